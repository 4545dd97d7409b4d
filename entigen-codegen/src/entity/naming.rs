use crate::util::upper_first;

/// Class name for a table: `user_roles` -> `UserRoles`.
pub fn class_name(table_name: &str) -> String {
    table_name.split('_').map(upper_first).collect()
}

/// Property name for a column or referenced table: `created_at` -> `createdAt`.
pub fn property_name(column_name: &str) -> String {
    let mut parts = column_name.split('_');
    let head = parts.next().unwrap_or_default().to_owned();
    parts.fold(head, |mut name, part| {
        name.push_str(&upper_first(part));
        name
    })
}
