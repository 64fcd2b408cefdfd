//! Write-only text attributes: the trait, a sysfs backend and an in-memory mock.

use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

// ── Trait ──

/// A write-only text attribute of a hardware control surface.
///
/// Handles are opened once, up front. An attribute that failed to open stays
/// in the tree so validity can be checked, but every write to it fails.
pub trait Attribute: Send {
    /// Identifier used in log messages (usually the path).
    fn label(&self) -> &str;
    /// Whether the underlying handle opened successfully.
    fn is_open(&self) -> bool;
    /// Write one value followed by a line terminator, as a single write.
    fn write_line(&mut self, value: &str) -> io::Result<()>;
}

/// Write a value, logging instead of propagating failures.
///
/// Hardware writes are fire-and-forget: there is no read-back and no retry.
pub(crate) fn write_logged<A: Attribute>(attr: &mut A, value: impl Display) {
    let value = value.to_string();
    if let Err(e) = attr.write_line(&value) {
        log::warn!("write {value:?} to {} failed: {e}", attr.label());
    }
}

// ── sysfs backend ──

/// A sysfs attribute file opened write-only.
#[derive(Debug)]
pub struct SysfsAttribute {
    label: String,
    file: Option<File>,
}

impl SysfsAttribute {
    /// Open an existing attribute for writing. Never fails: a missing or
    /// unwritable file yields an attribute whose [`Attribute::is_open`] is false.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file = match OpenOptions::new().write(true).open(path) {
            Ok(f) => Some(f),
            Err(e) => {
                log::debug!("open {} failed: {e}", path.display());
                None
            }
        };
        SysfsAttribute {
            label: path.display().to_string(),
            file,
        }
    }
}

impl Attribute for SysfsAttribute {
    fn label(&self) -> &str {
        &self.label
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn write_line(&mut self, value: &str) -> io::Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "attribute not open",
            ));
        };
        // sysfs parses one store() per write(): keep value and newline together.
        file.write_all(format!("{value}\n").as_bytes())?;
        file.flush()
    }
}

// ── Mock attribute for testing ──

/// In-memory attributes recording every write into a shared journal.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex, PoisonError};

    use crate::controller::LightController;
    use crate::led::{Backlight, LedAttributes, LedChannel, RgbLed};

    /// One recorded write: attribute label and the value written.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Entry {
        pub label: String,
        pub value: String,
    }

    /// Ordered record of writes shared by a set of mock attributes.
    #[derive(Debug, Clone, Default)]
    pub struct Journal(Arc<Mutex<Vec<Entry>>>);

    impl Journal {
        pub fn new() -> Self {
            Self::default()
        }

        fn push(&self, label: &str, value: &str) {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(Entry {
                    label: label.to_string(),
                    value: value.to_string(),
                });
        }

        /// All writes in order.
        pub fn writes(&self) -> Vec<Entry> {
            self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        /// Values written to one attribute, in order.
        pub fn values(&self, label: &str) -> Vec<String> {
            self.writes()
                .into_iter()
                .filter(|w| w.label == label)
                .map(|w| w.value)
                .collect()
        }

        /// Most recent value written to one attribute.
        pub fn last(&self, label: &str) -> Option<String> {
            self.values(label).pop()
        }

        pub fn len(&self) -> usize {
            self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        pub fn clear(&self) {
            self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }

    /// Attribute that appends to a [`Journal`] instead of touching a file.
    #[derive(Debug)]
    pub struct MockAttribute {
        label: String,
        journal: Journal,
        open: bool,
    }

    impl MockAttribute {
        pub fn new(label: impl Into<String>, journal: &Journal) -> Self {
            MockAttribute {
                label: label.into(),
                journal: journal.clone(),
                open: true,
            }
        }

        /// An attribute whose handle "failed to open".
        pub fn closed(label: impl Into<String>, journal: &Journal) -> Self {
            MockAttribute {
                open: false,
                ..Self::new(label, journal)
            }
        }
    }

    impl Attribute for MockAttribute {
        fn label(&self) -> &str {
            &self.label
        }

        fn is_open(&self) -> bool {
            self.open
        }

        fn write_line(&mut self, value: &str) -> io::Result<()> {
            if !self.open {
                return Err(io::Error::new(
                    io::ErrorKind::NotConnected,
                    "mock: attribute not open",
                ));
            }
            self.journal.push(&self.label, value);
            Ok(())
        }
    }

    /// Mock channel named `name` whose attributes are labelled `name/<leaf>`.
    pub fn channel(index: u32, name: &str, journal: &Journal) -> LedChannel<MockAttribute> {
        LedChannel::new(
            index,
            name,
            LedAttributes::from_fn(|leaf| MockAttribute::new(format!("{name}/{leaf}"), journal)),
        )
    }

    /// Controller over red/green/blue mock channels, an `rgb_blink` attribute
    /// and a `backlight` attribute with the given maximum brightness.
    pub fn controller(max_brightness: u32) -> (LightController<MockAttribute>, Journal) {
        let journal = Journal::new();
        let rgb = RgbLed::new(
            channel(0, "red", &journal),
            channel(1, "green", &journal),
            channel(2, "blue", &journal),
            MockAttribute::new("rgb_blink", &journal),
        );
        let backlight = Backlight::new(MockAttribute::new("backlight", &journal), max_brightness);
        (LightController::new(rgb, backlight), journal)
    }
}
