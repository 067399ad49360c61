//! Account settings forms

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Shortest accepted password, in characters
pub const MIN_PASSWORD_LEN: usize = 8;

/// Account profile as edited on the settings and profile pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub company: String,
    pub website: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            company: "AdminHub Inc.".to_string(),
            website: "https://www.adminhub.com".to_string(),
        }
    }
}

/// Change-password form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordForm {
    /// Check the new password.
    ///
    /// The confirmation is checked before the length.
    pub fn validate(&self) -> Result<()> {
        if self.new != self.confirm {
            return Err(Error::validation("New passwords do not match!"));
        }
        if self.new.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long!"
            )));
        }
        Ok(())
    }

    /// Validate and, on success, clear every field
    pub fn submit(&mut self) -> Result<()> {
        self.validate()?;
        debug!("Password updated");
        *self = Self::default();
        Ok(())
    }
}

/// Notification preference switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKey {
    Email,
    Desktop,
    Weekly,
    Marketing,
}

impl NotificationKey {
    pub const ALL: [NotificationKey; 4] = [
        Self::Email,
        Self::Desktop,
        Self::Weekly,
        Self::Marketing,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Email => "Email Notifications",
            Self::Desktop => "Desktop Notifications",
            Self::Weekly => "Weekly Reports",
            Self::Marketing => "Marketing Updates",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Email => "Receive notifications via email",
            Self::Desktop => "Show desktop notifications",
            Self::Weekly => "Receive weekly summary reports",
            Self::Marketing => "Receive product updates and tips",
        }
    }
}

/// Notification preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    pub email: bool,
    pub desktop: bool,
    pub weekly: bool,
    pub marketing: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            email: true,
            desktop: true,
            weekly: true,
            marketing: false,
        }
    }
}

impl NotificationPrefs {
    pub fn get(&self, key: NotificationKey) -> bool {
        match key {
            NotificationKey::Email => self.email,
            NotificationKey::Desktop => self.desktop,
            NotificationKey::Weekly => self.weekly,
            NotificationKey::Marketing => self.marketing,
        }
    }

    /// Flip one switch and return its new value
    pub fn toggle(&mut self, key: NotificationKey) -> bool {
        let slot = match key {
            NotificationKey::Email => &mut self.email,
            NotificationKey::Desktop => &mut self.desktop,
            NotificationKey::Weekly => &mut self.weekly,
            NotificationKey::Marketing => &mut self.marketing,
        };
        *slot = !*slot;
        debug!(preferences = ?self, "Notification preferences changed");
        self.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn form(new: &str, confirm: &str) -> PasswordForm {
        PasswordForm {
            current: "old-secret".to_string(),
            new: new.to_string(),
            confirm: confirm.to_string(),
        }
    }

    #[rstest]
    #[case("longenough", "different!", "New passwords do not match!")]
    #[case("short", "short", "Password must be at least 8 characters long!")]
    #[case("short", "other", "New passwords do not match!")]
    fn test_password_rejections(#[case] new: &str, #[case] confirm: &str, #[case] message: &str) {
        let mut form = form(new, confirm);
        let err = form.submit().unwrap_err();
        assert!(matches!(&err, Error::Validation(m) if m == message));
        assert_eq!(form.new, new);
    }

    #[test]
    fn test_password_success_clears_form() {
        let mut form = form("12345678", "12345678");
        form.submit().unwrap();
        assert_eq!(form, PasswordForm::default());
    }

    #[test]
    fn test_toggle_preferences() {
        let mut prefs = NotificationPrefs::default();
        assert!(prefs.toggle(NotificationKey::Marketing));
        assert!(!prefs.toggle(NotificationKey::Email));
        assert_eq!(
            prefs,
            NotificationPrefs {
                email: false,
                desktop: true,
                weekly: true,
                marketing: true,
            }
        );
    }
}
