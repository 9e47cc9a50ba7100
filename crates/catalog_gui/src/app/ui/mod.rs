//! Panels rendered each frame.

/// Table with sortable headers, the filter row, and inline editors.
pub(super) mod grid;
/// Bottom pager with page navigation and page-size choices.
pub(super) mod pager;
/// Top toolbar with the export action.
pub(super) mod toolbar;
