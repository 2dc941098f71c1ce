// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - icons: Item and presence icons with a color theme
// - layout: Calculates screen layout and keeps the last frame's areas for hit-testing
// - render: Main orchestration function that coordinates all rendering
// - sidebar: Renders the left navigation pane
// - item_list: Renders the virtualized drive listing
// - contact_list: Renders the contacts views with their tab strip
// - legend: Renders hotkey legend
// - search: Renders search input box with query and match count
// - status_bar: Renders bottom status bar with metrics
// - context_menu: Renders the right-click/`m` action menu
// - preview: Renders the file preview popup with image thumbnails
// - dialogs: Renders confirmation and input prompts
// - toast: Renders toast notifications (brief pop-up messages)

pub mod contact_list;
pub mod context_menu;
pub mod dialogs;
pub mod icons;
pub mod item_list;
pub mod layout;
pub mod legend;
pub mod preview;
pub mod render;
pub mod search;
pub mod sidebar;
pub mod status_bar;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
