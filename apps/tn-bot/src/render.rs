//! Action-line rendering.

use tn_planner::Action;

/// One output line: actions joined by `;`, or `WAIT` when there are none.
pub fn render<'a>(actions: impl IntoIterator<Item = &'a Action>) -> String {
    let line = actions.into_iter().map(ToString::to_string).collect::<Vec<_>>().join(";");
    if line.is_empty() { "WAIT".to_owned() } else { line }
}
