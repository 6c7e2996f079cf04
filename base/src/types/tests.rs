use test_strategy::proptest;

use super::{Address, ConversionFailed, NativeNumber};

#[test]
fn test_native_number_limits() {
    assert_eq!(NativeNumber::try_from(2_147_483_647_i64), Ok(NativeNumber::MAX));
    assert_eq!(NativeNumber::try_from(-2_147_483_648_i64), Ok(NativeNumber::MIN));
    assert_eq!(
        NativeNumber::try_from(2_147_483_648_i64),
        Err(ConversionFailed::TooLarge)
    );
    assert_eq!(
        NativeNumber::try_from(-2_147_483_649_i64),
        Err(ConversionFailed::TooSmall)
    );
    assert_eq!(
        NativeNumber::try_from(u32::MAX),
        Err(ConversionFailed::TooLarge)
    );
}

#[test]
fn test_address_limits() {
    assert_eq!(Address::try_from(0_i64), Ok(Address::ZERO));
    assert_eq!(Address::try_from(0xFFFF_u32), Ok(Address::MAX));
    assert_eq!(Address::try_from(0x10000_u32), Err(ConversionFailed::TooLarge));
    assert_eq!(Address::try_from(-1_i32), Err(ConversionFailed::TooSmall));
}

#[test]
fn test_address_distance() {
    let three = Address::from(3_u16);
    let seven = Address::from(7_u16);
    assert_eq!(seven.distance_from(three), Some(4));
    assert_eq!(three.distance_from(three), Some(0));
    assert_eq!(three.distance_from(seven), None);
}

#[test]
fn test_address_formatting() {
    let a = Address::from(0x2a_u16);
    assert_eq!(format!("{a}"), "42");
    assert_eq!(format!("{a:04x}"), "002a");
    assert_eq!(format!("{a:?}"), "Address(0x002a)");
    assert_eq!(format!("{:?}", NativeNumber::new(-5)), "NativeNumber(-5)");
}

#[test]
fn test_address_is_a_valid_native_number() {
    assert_eq!(NativeNumber::from(Address::MAX), NativeNumber::new(0xFFFF));
}

#[proptest]
fn native_number_round_trips_through_i64(n: i32) {
    let wide = i64::from(n);
    let number = NativeNumber::try_from(wide).expect("any i32 should fit");
    assert_eq!(i64::from(number), wide);
}

#[proptest]
fn native_number_rejects_values_outside_i32(#[strategy(1_i64..=(1_i64 << 40))] excess: i64) {
    let above = i64::from(i32::MAX) + excess;
    let below = i64::from(i32::MIN) - excess;
    assert_eq!(NativeNumber::try_from(above), Err(ConversionFailed::TooLarge));
    assert_eq!(NativeNumber::try_from(below), Err(ConversionFailed::TooSmall));
}

#[proptest]
fn address_round_trips_through_u32(a: Address) {
    let wide = u32::from(a);
    assert_eq!(Address::try_from(wide), Ok(a));
}

#[proptest]
fn address_ordering_matches_distance(a: Address, b: Address) {
    assert_eq!(a.distance_from(b).is_some(), a >= b);
}
