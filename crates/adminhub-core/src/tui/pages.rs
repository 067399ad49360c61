//! Per-page state that only the terminal UI needs

use crate::actions::{Action, ActionKind};
use crate::models::{ReportPeriod, ReportRequest, ReportType};
use crate::settings::{NotificationKey, PasswordForm, Profile};

/// Rows of the settings page, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Name,
    Email,
    Company,
    SaveProfile,
    CurrentPassword,
    NewPassword,
    ConfirmPassword,
    UpdatePassword,
    Notification(NotificationKey),
    DarkMode,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 13] = [
        Self::Name,
        Self::Email,
        Self::Company,
        Self::SaveProfile,
        Self::CurrentPassword,
        Self::NewPassword,
        Self::ConfirmPassword,
        Self::UpdatePassword,
        Self::Notification(NotificationKey::Email),
        Self::Notification(NotificationKey::Desktop),
        Self::Notification(NotificationKey::Weekly),
        Self::Notification(NotificationKey::Marketing),
        Self::DarkMode,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email Address",
            Self::Company => "Company",
            Self::SaveProfile => "[ Save Changes ]",
            Self::CurrentPassword => "Current Password",
            Self::NewPassword => "New Password",
            Self::ConfirmPassword => "Confirm Password",
            Self::UpdatePassword => "[ Update Password ]",
            Self::Notification(key) => key.title(),
            Self::DarkMode => "Dark Mode",
        }
    }

    /// Whether typing edits this row
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Self::Name
                | Self::Email
                | Self::Company
                | Self::CurrentPassword
                | Self::NewPassword
                | Self::ConfirmPassword
        )
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Self::CurrentPassword | Self::NewPassword | Self::ConfirmPassword)
    }
}

/// Settings page: account profile, password and preferences
#[derive(Debug, Clone, Default)]
pub struct SettingsPage {
    pub profile: Profile,
    pub password: PasswordForm,
    pub prefs: crate::settings::NotificationPrefs,
    pub selected: usize,
}

impl SettingsPage {
    pub fn row(&self) -> SettingsRow {
        SettingsRow::ALL[self.selected.min(SettingsRow::ALL.len() - 1)]
    }

    /// Text buffer behind a text row
    pub fn field_mut(&mut self, row: SettingsRow) -> Option<&mut String> {
        match row {
            SettingsRow::Name => Some(&mut self.profile.name),
            SettingsRow::Email => Some(&mut self.profile.email),
            SettingsRow::Company => Some(&mut self.profile.company),
            SettingsRow::CurrentPassword => Some(&mut self.password.current),
            SettingsRow::NewPassword => Some(&mut self.password.new),
            SettingsRow::ConfirmPassword => Some(&mut self.password.confirm),
            _ => None,
        }
    }

    pub fn field(&self, row: SettingsRow) -> Option<&str> {
        match row {
            SettingsRow::Name => Some(&self.profile.name),
            SettingsRow::Email => Some(&self.profile.email),
            SettingsRow::Company => Some(&self.profile.company),
            SettingsRow::CurrentPassword => Some(&self.password.current),
            SettingsRow::NewPassword => Some(&self.password.new),
            SettingsRow::ConfirmPassword => Some(&self.password.confirm),
            _ => None,
        }
    }
}

/// Rows of the profile page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRow {
    Name,
    Email,
    Company,
    Website,
    Save,
}

impl ProfileRow {
    pub const ALL: [ProfileRow; 5] = [
        Self::Name,
        Self::Email,
        Self::Company,
        Self::Website,
        Self::Save,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email Address",
            Self::Company => "Company",
            Self::Website => "Website",
            Self::Save => "[ Save Changes ]",
        }
    }
}

/// Profile page
#[derive(Debug, Clone, Default)]
pub struct ProfilePage {
    pub profile: Profile,
    pub selected: usize,
}

impl ProfilePage {
    pub fn row(&self) -> ProfileRow {
        ProfileRow::ALL[self.selected.min(ProfileRow::ALL.len() - 1)]
    }

    pub fn field_mut(&mut self, row: ProfileRow) -> Option<&mut String> {
        match row {
            ProfileRow::Name => Some(&mut self.profile.name),
            ProfileRow::Email => Some(&mut self.profile.email),
            ProfileRow::Company => Some(&mut self.profile.company),
            ProfileRow::Website => Some(&mut self.profile.website),
            ProfileRow::Save => None,
        }
    }

    pub fn field(&self, row: ProfileRow) -> Option<&str> {
        match row {
            ProfileRow::Name => Some(&self.profile.name),
            ProfileRow::Email => Some(&self.profile.email),
            ProfileRow::Company => Some(&self.profile.company),
            ProfileRow::Website => Some(&self.profile.website),
            ProfileRow::Save => None,
        }
    }
}

/// A card with a single button, as on the billing and team pages
#[derive(Debug, Clone, Copy)]
pub struct ActionCard {
    pub title: &'static str,
    pub description: &'static str,
    pub button: &'static str,
    pub kind: ActionKind,
}

impl ActionCard {
    pub fn action(&self) -> Option<Action> {
        match self.kind {
            ActionKind::AddPaymentMethod => Some(Action::AddPaymentMethod),
            ActionKind::UpgradePlan => Some(Action::UpgradePlan),
            ActionKind::DownloadInvoiceHistory => Some(Action::DownloadInvoiceHistory),
            ActionKind::InviteMembers => Some(Action::InviteMembers),
            ActionKind::UpdateRoles => Some(Action::UpdateRoles),
            ActionKind::SaveTeamSettings => Some(Action::SaveTeamSettings),
            _ => None,
        }
    }
}

pub const BILLING_CARDS: [ActionCard; 3] = [
    ActionCard {
        title: "Payment Methods",
        description: "Manage your payment methods and billing information.",
        button: "Add Payment Method",
        kind: ActionKind::AddPaymentMethod,
    },
    ActionCard {
        title: "Current Plan",
        description: "Professional plan, billed monthly.",
        button: "Upgrade Plan",
        kind: ActionKind::UpgradePlan,
    },
    ActionCard {
        title: "Billing History",
        description: "View and download your past invoices.",
        button: "Download History",
        kind: ActionKind::DownloadInvoiceHistory,
    },
];

pub const TEAM_CARDS: [ActionCard; 3] = [
    ActionCard {
        title: "Team Members",
        description: "Invite new members and manage existing ones.",
        button: "Invite Members",
        kind: ActionKind::InviteMembers,
    },
    ActionCard {
        title: "Roles & Permissions",
        description: "Control what each member can access.",
        button: "Update Roles",
        kind: ActionKind::UpdateRoles,
    },
    ActionCard {
        title: "Team Settings",
        description: "AdminHub Team, 5 members, 45% storage used.",
        button: "Save Settings",
        kind: ActionKind::SaveTeamSettings,
    },
];

/// Field of the generate-report dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormField {
    #[default]
    Type,
    Period,
}

/// Generate-report dialog
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportForm {
    pub request: ReportRequest,
    pub focus: ReportFormField,
}

impl ReportForm {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ReportFormField::Type => ReportFormField::Period,
            ReportFormField::Period => ReportFormField::Type,
        };
    }

    /// Step the focused selection forwards or backwards
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            ReportFormField::Type => {
                self.request.report_type =
                    step(&ReportType::ALL, self.request.report_type, forward);
            }
            ReportFormField::Period => {
                self.request.period = step(&ReportPeriod::ALL, self.request.period, forward);
            }
        }
    }
}

fn step<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    options[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_form_cycles() {
        let mut form = ReportForm::default();
        form.cycle(true);
        assert_eq!(form.request.report_type, ReportType::Financial);
        form.cycle(false);
        form.cycle(false);
        assert_eq!(form.request.report_type, ReportType::Performance);

        form.toggle_focus();
        form.cycle(true);
        assert_eq!(form.request.period, ReportPeriod::Last90);
    }

    #[test]
    fn test_cards_map_to_actions() {
        for card in BILLING_CARDS.iter().chain(TEAM_CARDS.iter()) {
            let action = card.action().unwrap();
            assert_eq!(action.kind(), card.kind);
        }
    }

    #[test]
    fn test_settings_text_rows_have_fields() {
        let mut page = SettingsPage::default();
        for row in SettingsRow::ALL {
            assert_eq!(row.is_text(), page.field_mut(row).is_some());
        }
    }
}
