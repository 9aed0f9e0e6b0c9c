//! Column declarations and user visibility choices.
//!
//! Checks follow declaration order; toggling only flips `checked`. Reloading
//! (after a locale change) recomputes titles and keeps each key's choice.

use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One declared column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    pub key: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
}

impl TableColumn {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            width: None,
            align: None,
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnCheck {
    pub key: String,
    pub title: String,
    pub checked: bool,
}

/// Declared columns plus the visibility checks derived from them.
#[derive(Debug, Clone, Default)]
pub struct ColumnState {
    columns: Vec<TableColumn>,
    checks: Vec<ColumnCheck>,
}

impl ColumnState {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        let checks = columns
            .iter()
            .map(|c| ColumnCheck {
                key: c.key.clone(),
                title: c.title.clone(),
                checked: true,
            })
            .collect();
        Self { columns, checks }
    }

    /// Replace the declarations, keeping `checked` for keys that survive.
    pub fn reload(&mut self, columns: Vec<TableColumn>) {
        let previous: HashMap<&str, bool> = self
            .checks
            .iter()
            .map(|c| (c.key.as_str(), c.checked))
            .collect();

        let checks = columns
            .iter()
            .map(|c| ColumnCheck {
                key: c.key.clone(),
                title: c.title.clone(),
                checked: previous.get(c.key.as_str()).copied().unwrap_or(true),
            })
            .collect();

        self.checks = checks;
        self.columns = columns;
    }

    pub fn checks(&self) -> &[ColumnCheck] {
        &self.checks
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Flip a column. Returns the new state, or `None` for an unknown key.
    pub fn toggle(&mut self, key: &str) -> Option<bool> {
        let check = self.checks.iter_mut().find(|c| c.key == key)?;
        check.checked = !check.checked;
        Some(check.checked)
    }

    /// Returns `false` for an unknown key.
    pub fn set_checked(&mut self, key: &str, checked: bool) -> bool {
        match self.checks.iter_mut().find(|c| c.key == key) {
            Some(check) => {
                check.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Checked columns in check order.
    pub fn visible(&self) -> Vec<&TableColumn> {
        let by_key: HashMap<&str, &TableColumn> =
            self.columns.iter().map(|c| (c.key.as_str(), c)).collect();
        self.checks
            .iter()
            .filter(|c| c.checked)
            .filter_map(|c| by_key.get(c.key.as_str()).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(titles: [&str; 3]) -> Vec<TableColumn> {
        vec![
            TableColumn::new("index", titles[0]).width(64),
            TableColumn::new("name", titles[1]),
            TableColumn::new("status", titles[2]).align(Align::Center),
        ]
    }

    #[test]
    fn test_unchecked_column_is_projected_out() {
        let mut state = ColumnState::new(declared(["No.", "Name", "Status"]));
        assert_eq!(state.toggle("name"), Some(false));

        let keys: Vec<&str> = state.visible().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["index", "status"]);
        assert_eq!(state.toggle("missing"), None);
    }

    #[test]
    fn test_reload_keeps_checked_state_and_new_titles() {
        let mut state = ColumnState::new(declared(["No.", "Name", "Status"]));
        state.set_checked("status", false);

        state.reload(declared(["序号", "名称", "状态"]));

        assert_eq!(state.checks()[1].title, "名称");
        assert!(!state.checks()[2].checked);
        assert!(state.checks()[0].checked);
        assert_eq!(state.visible().len(), 2);
    }

    #[test]
    fn test_reload_adds_new_columns_checked() {
        let mut state = ColumnState::new(vec![TableColumn::new("a", "A")]);
        state.set_checked("a", false);
        state.reload(vec![TableColumn::new("a", "A"), TableColumn::new("b", "B")]);

        assert_eq!(
            state.checks().iter().map(|c| c.checked).collect::<Vec<_>>(),
            [false, true]
        );
        assert!(!state.set_checked("zzz", true));
    }
}
