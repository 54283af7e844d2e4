//! Scanner over a list of argument strings.

use std::fmt;
use std::io::Cursor;

use tdop_ir::Location;

use crate::{
    ChainingScanner, EncodingErrorHandler, FileScanner, FileScannerOptions, LineStyle,
    MemoizingScanner,
};

/// Options for [`argument_scanner`].
#[derive(Clone)]
pub struct ArgumentScannerOptions {
    /// Text placed between consecutive arguments.
    pub joiner: String,
    pub encoding_error_handler: Option<EncodingErrorHandler>,
}

impl ArgumentScannerOptions {
    #[must_use]
    pub fn with_joiner(mut self, joiner: impl Into<String>) -> Self {
        self.joiner = joiner.into();
        self
    }
}

impl Default for ArgumentScannerOptions {
    fn default() -> Self {
        ArgumentScannerOptions {
            joiner: " ".to_string(),
            encoding_error_handler: None,
        }
    }
}

impl fmt::Debug for ArgumentScannerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentScannerOptions")
            .field("joiner", &self.joiner)
            .field("encoding_error_handler", &self.encoding_error_handler.is_some())
            .finish()
    }
}

/// Chain the arguments with the joiner between each pair.
///
/// Characters of argument `i` (1-based) carry argument index `i`; joiner
/// characters carry index 0. The joiner is scanned once and replayed.
pub fn argument_scanner<I, S>(args: I, options: ArgumentScannerOptions) -> ChainingScanner
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file_options = FileScannerOptions {
        encoding_error_handler: options.encoding_error_handler,
        ..FileScannerOptions::default()
    };
    let joiner = MemoizingScanner::new(FileScanner::with_options(
        Cursor::new(options.joiner.into_bytes()),
        Location::arg(0),
        file_options.clone().with_line_style(LineStyle::None),
    ));

    let mut chain = ChainingScanner::new(Vec::new());
    for (i, arg) in args.into_iter().enumerate() {
        if i > 0 {
            chain.push(joiner.clone());
        }
        let index = u32::try_from(i + 1).unwrap_or(u32::MAX);
        chain.push(FileScanner::with_options(
            Cursor::new(arg.as_ref().as_bytes().to_vec()),
            Location::arg(index),
            file_options.clone(),
        ));
    }
    chain
}
