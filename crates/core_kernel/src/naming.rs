//! Field-to-column naming rule
//!
//! Record fields use camelCase, table columns use snake_case. A column name is
//! derived by putting an underscore between a lowercase letter and the run of
//! uppercase letters that follows it, then lowercasing the whole name.

/// Converts a camelCase field name into its snake_case column name
///
/// # Example
///
/// ```rust
/// use core_kernel::camel_to_snake;
///
/// assert_eq!(camel_to_snake("departmentId"), "department_id");
/// assert_eq!(camel_to_snake("userURL"), "user_url");
/// ```
pub fn camel_to_snake(field: &str) -> String {
    let mut column = String::with_capacity(field.len() + 4);
    let mut previous: Option<char> = None;

    for ch in field.chars() {
        if ch.is_ascii_uppercase() && previous.is_some_and(|p| p.is_ascii_lowercase()) {
            column.push('_');
        }
        column.push(ch.to_ascii_lowercase());
        previous = Some(ch);
    }

    column
}
