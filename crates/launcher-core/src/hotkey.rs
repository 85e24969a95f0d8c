//! Bookkeeping for the single show/hide hotkey. The platform registration
//! goes through [`HotkeyRegistrar`].

use log::{info, warn};

use crate::error::HotkeyError;

pub trait HotkeyRegistrar {
    fn register(&self, hotkey: &str) -> Result<(), String>;
    fn unregister(&self, hotkey: &str) -> Result<(), String>;
}

/// The hotkey that is currently registered, if any.
#[derive(Debug, Default)]
pub struct HotkeyBinding {
    current: Option<String>,
}

impl HotkeyBinding {
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Switches to `hotkey`. The new hotkey is registered before the old one
    /// is released, so a rejected hotkey leaves the previous binding working.
    /// `None` or a blank string only unbinds.
    pub fn rebind<R>(&mut self, registrar: &R, hotkey: Option<&str>) -> Result<(), HotkeyError>
    where
        R: HotkeyRegistrar + ?Sized,
    {
        let hotkey = hotkey.map(str::trim).filter(|value| !value.is_empty());
        if hotkey == self.current() {
            return Ok(());
        }

        if let Some(hotkey) = hotkey {
            registrar
                .register(hotkey)
                .map_err(|message| HotkeyError::Register {
                    hotkey: hotkey.to_string(),
                    message,
                })?;
            info!("bound show/hide hotkey {hotkey}");
        }

        let previous = std::mem::replace(&mut self.current, hotkey.map(str::to_string));
        if let Some(previous) = previous {
            if let Err(err) = registrar.unregister(&previous) {
                warn!("failed to unregister previous hotkey {previous}: {err}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct FakeRegistrar {
        registered: RefCell<Vec<String>>,
        rejected: Vec<&'static str>,
    }

    impl HotkeyRegistrar for FakeRegistrar {
        fn register(&self, hotkey: &str) -> Result<(), String> {
            if self.rejected.contains(&hotkey) {
                return Err(format!("cannot parse {hotkey}"));
            }
            self.registered.borrow_mut().push(hotkey.to_string());
            Ok(())
        }

        fn unregister(&self, hotkey: &str) -> Result<(), String> {
            self.registered.borrow_mut().retain(|bound| bound != hotkey);
            Ok(())
        }
    }

    #[test]
    fn rebind_replaces_previous_hotkey() {
        let registrar = FakeRegistrar::default();
        let mut binding = HotkeyBinding::default();

        binding.rebind(&registrar, Some(" Alt+Space ")).unwrap();
        binding.rebind(&registrar, Some("Ctrl+Shift+L")).unwrap();

        assert_eq!(binding.current(), Some("Ctrl+Shift+L"));
        assert_eq!(*registrar.registered.borrow(), ["Ctrl+Shift+L"]);
    }

    #[test]
    fn rejected_hotkey_keeps_the_working_one() {
        let registrar = FakeRegistrar {
            rejected: vec!["Bogus+"],
            ..Default::default()
        };
        let mut binding = HotkeyBinding::default();
        binding.rebind(&registrar, Some("Alt+Space")).unwrap();

        let err = binding.rebind(&registrar, Some("Bogus+")).unwrap_err();

        assert!(matches!(err, HotkeyError::Register { ref hotkey, .. } if hotkey == "Bogus+"));
        assert_eq!(binding.current(), Some("Alt+Space"));
        assert_eq!(*registrar.registered.borrow(), ["Alt+Space"]);
    }

    #[test]
    fn blank_hotkey_unbinds() {
        let registrar = FakeRegistrar::default();
        let mut binding = HotkeyBinding::default();
        binding.rebind(&registrar, Some("Alt+Space")).unwrap();

        binding.rebind(&registrar, Some("  ")).unwrap();

        assert_eq!(binding.current(), None);
        assert!(registrar.registered.borrow().is_empty());
    }

    #[test]
    fn same_hotkey_is_not_registered_twice() {
        let registrar = FakeRegistrar::default();
        let mut binding = HotkeyBinding::default();
        binding.rebind(&registrar, Some("Alt+Space")).unwrap();
        binding.rebind(&registrar, Some("Alt+Space")).unwrap();

        assert_eq!(*registrar.registered.borrow(), ["Alt+Space"]);
    }
}
