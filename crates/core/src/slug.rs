//! Task-name to project-slug derivation.

/// Derives the deterministic project slug for a task name.
///
/// Lowercases the input; every maximal run of characters outside `[a-z0-9]`
/// collapses to a single hyphen; leading and trailing hyphens are stripped.
/// `"My Task"` becomes `my-task`, `"A/B Test!!"` becomes `a-b-test`.
pub fn project_slug(task: &str) -> String {
    let mut out = String::with_capacity(task.len());
    for c in task.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}
