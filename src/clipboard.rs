use crate::error::ClipboardError;
use arboard::Clipboard;
use colored::*;
use log::debug;
use std::io::Write;

/// Something that can receive copied text.
#[cfg_attr(test, mockall::automock)]
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Surface for blocking failure messages the user has to acknowledge.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// The desktop clipboard.
///
/// The underlying handle is opened on first use, so running without a
/// display server only fails the copy itself.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut Clipboard, ClipboardError> {
        if self.clipboard.is_none() {
            let clipboard = Clipboard::new().map_err(|e| {
                ClipboardError::Unavailable(format!("Failed to initialize clipboard: {e}"))
            })?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard not initialized".to_string()))
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.handle()?
            .set_text(text)
            .map_err(ClipboardError::WriteFailed)?;
        debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}

/// Copy `vin` for the one-shot commands and confirm it on `status`.
///
/// Nothing is written to `status` when the clipboard refuses the text; the
/// error is returned for the caller to report.
pub fn copy_vin(
    clipboard: &mut dyn ClipboardWriter,
    vin: &str,
    status: &mut dyn Write,
) -> crate::Result<()> {
    clipboard.write_text(vin)?;
    writeln!(status, "{} {}", "Kopiert:".green(), vin)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VinError;
    use mockall::predicate::eq;

    #[test]
    fn test_copy_vin_confirms_on_status() {
        let mut clipboard = MockClipboardWriter::new();
        clipboard
            .expect_write_text()
            .with(eq("WBA5A7C53FG123456"))
            .times(1)
            .returning(|_| Ok(()));
        let mut status = Vec::new();

        copy_vin(&mut clipboard, "WBA5A7C53FG123456", &mut status).unwrap();

        let status = String::from_utf8(status).unwrap();
        assert!(status.contains("Kopiert:"));
        assert!(status.contains("WBA5A7C53FG123456"));
    }

    #[test]
    fn test_copy_vin_failure_writes_nothing() {
        let mut clipboard = MockClipboardWriter::new();
        clipboard
            .expect_write_text()
            .times(1)
            .returning(|_| Err(ClipboardError::Unavailable("no display".to_string())));
        let mut status = Vec::new();

        let err = copy_vin(&mut clipboard, "WBA5A7C53FG123456", &mut status).unwrap_err();

        assert!(matches!(err, VinError::Clipboard(_)));
        assert_eq!(
            err.to_string(),
            "Kopieren nicht möglich. Bitte manuell kopieren."
        );
        assert!(status.is_empty());
    }
}
