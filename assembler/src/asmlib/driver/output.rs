use std::io::Write;
use std::path::Path;

use tracing::{event, span, Level};

use super::super::line::Word;
use super::super::types::{AssemblerFailure, IoAction, IoFailed, IoTarget};

/// Write the program image to `writer`, one word per line in
/// decimal.  Opcodes are written as their numeric codes.
///
/// # Errors
///
/// Failure to write or flush the output; `output_file_name` is used
/// only to describe the failure.
pub fn write_words<W: Write>(
    writer: &mut W,
    output_file_name: &Path,
    words: &[Word],
) -> Result<(), AssemblerFailure> {
    let span = span!(Level::ERROR, "write program image");
    let _enter = span.enter();

    let mut inner = || -> Result<(), std::io::Error> {
        for word in words {
            writeln!(writer, "{}", word.value())?;
        }
        writer.flush()
    };
    inner().map_err(|e| {
        AssemblerFailure::Io(IoFailed {
            action: IoAction::Write,
            target: IoTarget::File(output_file_name.to_path_buf()),
            error: e,
        })
    })?;
    event!(
        Level::DEBUG,
        "wrote {} words to {}",
        words.len(),
        output_file_name.display()
    );
    Ok(())
}
