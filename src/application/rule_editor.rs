//! Free-form survival/birth digit entry.
//!
//! Each field holds the digits the user typed. Only '0'..='8' are accepted,
//! and every edit produces a [`Command::SetRules`] so the new rule applies
//! to the next step without a restart.

use super::controls::Command;
use crate::domain::RuleSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleField {
    Survival,
    Birth,
}

impl RuleField {
    pub fn label(&self) -> &'static str {
        match self {
            RuleField::Survival => "Survival",
            RuleField::Birth => "Birth",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RuleEditor {
    survival: String,
    birth: String,
    editing: Option<RuleField>,
}

impl RuleEditor {
    pub fn new(rules: &RuleSet) -> Self {
        let mut editor = Self::default();
        editor.sync(rules);
        editor
    }

    pub fn survival(&self) -> &str {
        &self.survival
    }

    pub fn birth(&self) -> &str {
        &self.birth
    }

    pub fn text(&self, field: RuleField) -> &str {
        match field {
            RuleField::Survival => &self.survival,
            RuleField::Birth => &self.birth,
        }
    }

    pub fn editing(&self) -> Option<RuleField> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Start editing `field`; selecting the field being edited stops editing
    pub fn toggle_focus(&mut self, field: RuleField) {
        self.editing = if self.editing == Some(field) { None } else { Some(field) };
    }

    pub fn finish(&mut self) {
        self.editing = None;
    }

    /// Mirror rules changed elsewhere (presets). Ignored while editing.
    pub fn sync(&mut self, rules: &RuleSet) {
        if self.is_editing() {
            return;
        }
        self.survival = rules.survival().to_string();
        self.birth = rules.birth().to_string();
    }

    /// Rule the two fields currently spell
    pub fn rules(&self) -> RuleSet {
        RuleSet::from_digits(&self.survival, &self.birth)
    }

    /// Type a character into the focused field.
    /// Anything but a count digit is dropped and yields no command.
    pub fn type_char(&mut self, c: char) -> Option<Command> {
        if !('0'..='8').contains(&c) {
            return None;
        }
        self.focused_text()?.push(c);
        Some(Command::SetRules(self.rules()))
    }

    /// Delete the last digit of the focused field
    pub fn backspace(&mut self) -> Option<Command> {
        self.focused_text()?.pop()?;
        Some(Command::SetRules(self.rules()))
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.editing? {
            RuleField::Survival => Some(&mut self.survival),
            RuleField::Birth => Some(&mut self.birth),
        }
    }
}
