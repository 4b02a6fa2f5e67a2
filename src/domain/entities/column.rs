use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub id: String,
    pub label: String,
    pub accessor: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub is_date: bool,
    #[serde(default)]
    pub edit_options: Vec<String>,
    #[serde(default)]
    pub is_action_column: bool,
}

fn default_visible() -> bool {
    true
}

impl ColumnSpec {
    /// Sortable, visible, read-only data column whose id and accessor share a key.
    pub fn new(accessor: &str, label: &str) -> Self {
        Self {
            id: accessor.to_string(),
            label: label.to_string(),
            accessor: accessor.to_string(),
            sortable: true,
            visible: true,
            editable: false,
            is_date: false,
            edit_options: Vec::new(),
            is_action_column: false,
        }
    }

    pub fn date(mut self) -> Self {
        self.is_date = true;
        self
    }

    pub fn editable_with(mut self, options: &[&str]) -> Self {
        self.editable = true;
        self.edit_options = options.iter().map(|option| option.to_string()).collect();
        self
    }

    pub fn action(mut self) -> Self {
        self.sortable = false;
        self.is_action_column = true;
        self
    }
}

pub fn find_column<'a>(columns: &'a [ColumnSpec], accessor: &str) -> Option<&'a ColumnSpec> {
    columns.iter().find(|column| column.accessor == accessor)
}

/// Column set of the employee table.
pub fn default_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("name", "NAME"),
        ColumnSpec::new("managerEmail", "MANAGER EMAIL"),
        ColumnSpec::new("enps", "ENPS"),
        ColumnSpec::new("mrxScore", "MRX SCORE"),
        ColumnSpec::new("dateOfJoining", "DATE OF JOINING").date(),
        ColumnSpec::new("tenureInCurrentRole", "TENURE IN CURRENT ROLE"),
        ColumnSpec::new("totalAttrition", "TOTAL ATTRITION"),
        ColumnSpec::new("tenure", "TENURE"),
        ColumnSpec::new("status", "STATUS").editable_with(&[
            "Active",
            "Inactive",
            "On Leave",
            "Terminated",
        ]),
        ColumnSpec::new("actions", "ACTIONS").action(),
    ]
}
