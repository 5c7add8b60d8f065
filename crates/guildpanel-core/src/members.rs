/// One `<option>` of the `#guild-page-all-roles-source` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleOption {
    pub value: String,
    pub label: String,
}

/// Splits the role list for the member-roles modal: roles the member lacks
/// can be given, roles the member holds can be taken.
pub fn partition_roles(all: &[RoleOption], held: &[String]) -> (Vec<RoleOption>, Vec<RoleOption>) {
    let take: Vec<RoleOption> = held
        .iter()
        .filter_map(|role_id| all.iter().find(|option| &option.value == role_id))
        .cloned()
        .collect();
    let give = all
        .iter()
        .filter(|option| !take.iter().any(|taken| taken.value == option.value))
        .cloned()
        .collect();
    (give, take)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarState {
    pub selected: u32,
    pub visible: bool,
    pub select_all_checked: bool,
    pub select_all_indeterminate: bool,
}

impl ToolbarState {
    pub fn from_counts(selected: u32, total: u32) -> Self {
        Self {
            selected,
            visible: selected > 0,
            select_all_checked: selected > 0 && selected == total,
            select_all_indeterminate: selected > 0 && selected < total,
        }
    }
}

/// Case-insensitive substring match over a member row's name and id cells.
pub fn member_matches(name: &str, id: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&term) || id.to_lowercase().contains(&term)
}
