//! Clipboard decoding for demap.
//!
//! The clipboard text is read, decoded and written back in one round trip.
//! The system clipboard is only available with the `clipboard` feature.

use crate::decode::{DecodeStats, Decoder};
use crate::error::Result;

/// Text storage that can be read and replaced.
pub trait TextClipboard {
	fn get_text(&mut self) -> Result<String>;

	fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Replace the clipboard text with its decoded form.
///
/// The clipboard is left untouched if reading it fails.
pub fn decode_clipboard<C: TextClipboard + ?Sized>(
	clipboard: &mut C,
	decoder: &Decoder,
) -> Result<DecodeStats> {
	let text = clipboard.get_text()?;
	let (decoded, stats) = decoder.decode(&text);
	tracing::info!("clipboard: {} replaced", stats.replaced);

	clipboard.set_text(&decoded)?;
	Ok(stats)
}

#[cfg(feature = "clipboard")]
pub use system::SystemClipboard;

#[cfg(feature = "clipboard")]
mod system {
	use super::TextClipboard;
	use crate::error::{DemapError, Result};

	/// The desktop clipboard, through `arboard`.
	pub struct SystemClipboard {
		inner: arboard::Clipboard,
	}

	impl SystemClipboard {
		pub fn new() -> Result<Self> {
			let inner = arboard::Clipboard::new().map_err(clipboard_error)?;
			Ok(SystemClipboard { inner })
		}
	}

	impl TextClipboard for SystemClipboard {
		fn get_text(&mut self) -> Result<String> {
			self.inner.get_text().map_err(clipboard_error)
		}

		fn set_text(&mut self, text: &str) -> Result<()> {
			self.inner.set_text(text).map_err(clipboard_error)
		}
	}

	fn clipboard_error(source: arboard::Error) -> DemapError {
		DemapError::Clipboard {
			source: Box::new(source),
		}
	}
}
