//! Add-client form state

use chrono::NaiveDate;

use super::Roster;
use crate::error::Result;
use crate::models::{ClientRecord, NewClient};

/// Field of the add-client form that receives input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Email,
    Status,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Status,
            Self::Status => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Status,
            Self::Email => Self::Name,
            Self::Status => Self::Email,
        }
    }
}

/// The add-client dialog: open flag plus the draft being typed
#[derive(Debug, Clone, Default)]
pub struct ClientForm {
    open: bool,
    pub draft: NewClient,
    pub focus: FormField,
}

impl ClientForm {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close and discard the draft
    pub fn cancel(&mut self) {
        self.open = false;
        self.reset();
    }

    fn reset(&mut self) {
        self.draft = NewClient::default();
        self.focus = FormField::default();
    }

    /// Type a character into the focused text field
    pub fn input(&mut self, c: char) {
        match self.focus {
            FormField::Name => self.draft.name.push(c),
            FormField::Email => self.draft.email.push(c),
            FormField::Status => {}
        }
    }

    /// Delete the last character of the focused text field
    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Name => {
                self.draft.name.pop();
            }
            FormField::Email => {
                self.draft.email.pop();
            }
            FormField::Status => {}
        }
    }

    /// Move the focused status selection to the next option
    pub fn cycle_status(&mut self) {
        self.draft.status = self.draft.status.next();
    }

    /// Submit the draft to `roster`.
    ///
    /// On success the dialog closes and resets. On a validation failure the
    /// dialog stays open with the draft intact.
    pub fn submit(&mut self, roster: &mut Roster, today: NaiveDate) -> Result<ClientRecord> {
        let record = roster.add_on(self.draft.clone(), today)?.clone();
        self.open = false;
        self.reset();
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn type_text(form: &mut ClientForm, text: &str) {
        text.chars().for_each(|c| form.input(c));
    }

    #[test]
    fn test_submit_without_name_keeps_form_open() {
        let mut roster = Roster::seeded();
        let mut form = ClientForm::default();
        form.open();
        form.focus = FormField::Email;
        type_text(&mut form, "new@client.com");

        assert!(form.submit(&mut roster, today()).is_err());
        assert!(form.is_open());
        assert_eq!(form.draft.email, "new@client.com");
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn test_submit_success_closes_and_resets() {
        let mut roster = Roster::seeded();
        let mut form = ClientForm::default();
        form.open();
        type_text(&mut form, "Nova");
        form.focus = form.focus.next();
        type_text(&mut form, "nova@x.io");
        form.focus = form.focus.next();
        form.cycle_status();

        let record = form.submit(&mut roster, today()).unwrap();

        assert_eq!(record.name, "Nova");
        assert_eq!(record.status, ClientStatus::Inactive);
        assert!(!form.is_open());
        assert_eq!(form.draft, NewClient::default());
        assert_eq!(form.focus, FormField::Name);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut form = ClientForm::default();
        form.open();
        type_text(&mut form, "Draft");
        form.backspace();
        assert_eq!(form.draft.name, "Draf");

        form.cancel();
        assert!(!form.is_open());
        assert!(form.draft.name.is_empty());
    }

    #[test]
    fn test_status_field_ignores_text_input() {
        let mut form = ClientForm::default();
        form.focus = FormField::Status;
        form.input('x');
        assert_eq!(form.draft, NewClient::default());
    }
}
