use crate::App;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

use super::{
    contact_list::{self, ContactListView, CONTACT_ROW_HEIGHT},
    context_menu, dialogs,
    item_list::{self, ItemListView},
    layout::{self, ScreenAreas},
    legend::{self, LegendContext},
    preview, search, sidebar,
    status_bar::{self, StatusInfo},
    toast,
};
use crate::logic::contacts::ContactView;
use crate::model::{Focus, Location, SidebarEntry};

/// Breadcrumb text of the current location
fn location_label(app: &App) -> String {
    let location = &app.model.navigation.location;
    let crumbs = location.breadcrumb(&app.model.drive.names);
    let mut label = match location {
        Location::PublicLink { .. } if crumbs.is_empty() => "Public link".to_string(),
        _ if crumbs.is_empty() => "Drive".to_string(),
        _ => crumbs.join(" / "),
    };
    if location.is_read_only() {
        label.push_str(" (read-only)");
    }
    label
}

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let is_contacts = app.model.navigation.location.is_contacts();

    let legend_ctx = LegendContext {
        vim_mode: app.model.ui.vim_mode,
        contacts: is_contacts,
        trash: app.model.navigation.location.is_trash(),
        read_only: app.model.navigation.location.is_read_only(),
        search_mode: app.model.ui.search_mode,
        has_search_query: !app.model.ui.search_query.is_empty(),
        dragging: app.model.ui.drag.is_some(),
    };
    let search_visible = app.model.ui.search_mode || !app.model.ui.search_query.is_empty();
    let layout_info = layout::calculate_layout(
        size,
        legend::calculate_legend_height(size.width, legend_ctx),
        search_visible,
    );

    // Sidebar
    let active_entry = app
        .model
        .navigation
        .location
        .sidebar_entry()
        .unwrap_or(SidebarEntry::Drive);
    sidebar::render_sidebar(
        f,
        layout_info.sidebar_area,
        active_entry,
        app.model.navigation.sidebar_cursor,
        app.model.navigation.focus == Focus::Sidebar,
        app.model.contacts.count(ContactView::RequestsIn),
    );

    // Measure rows before asking the virtualizer for the visible range
    let keys = app.model.list_keys();
    let row_height = if is_contacts { CONTACT_ROW_HEIGHT } else { 1 };
    let virtualizer = &mut app.model.navigation.virtualizer;
    for key in &keys {
        if !virtualizer.is_measured(key) {
            virtualizer.measure(key, row_height);
        }
    }

    let viewport = layout_info.list_area.height.saturating_sub(2) as usize;
    let total_size = virtualizer.total_size(&keys);
    let scroll_offset = app
        .model
        .navigation
        .scroll_offset
        .min(total_size.saturating_sub(viewport));
    app.model.navigation.scroll_offset = scroll_offset;
    let rows = app
        .model
        .navigation
        .virtualizer
        .range(&keys, scroll_offset, viewport);

    let list_focused = app.model.navigation.focus == Focus::List;
    let (list_inner, drawn) = if is_contacts {
        let view = app
            .model
            .navigation
            .location
            .contact_view()
            .unwrap_or(ContactView::All);
        contact_list::render_contact_list(
            f,
            layout_info.list_area,
            ContactListView {
                view,
                contacts: &app.model.contacts,
                rows: &rows,
                scroll_offset,
                total_size,
                cursor: app.model.navigation.cursor,
                focused: list_focused,
                now_ms: crate::app::contacts::now_ms(),
                online_timeout_ms: app.config.online_timeout_secs * 1000,
            },
            &app.icon_renderer,
        )
    } else {
        let title = Line::from(vec![Span::styled(
            format!(" {} ", location_label(app)),
            Style::default().add_modifier(Modifier::BOLD),
        )]);
        item_list::render_item_list(
            f,
            layout_info.list_area,
            ItemListView {
                title,
                items: &app.model.drive.items,
                rows: &rows,
                scroll_offset,
                total_size,
                cursor: app.model.navigation.cursor,
                drop_hover: app.model.ui.drop_hover,
                drag: app.model.ui.drag.as_ref(),
                directory_sizes: &app.model.drive.directory_sizes,
                display_mode: app.model.ui.display_mode,
                focused: list_focused,
                loading: app.model.drive.loading,
                error: app.model.drive.error.as_deref(),
            },
            &app.icon_renderer,
        )
    };

    let location = location_label(app);

    if let Some(search_area) = layout_info.search_area {
        let contact_view = app.model.navigation.location.contact_view();
        let (scope, shown, total) = match contact_view {
            Some(view) => (
                search::SearchScope::Contacts(view.label()),
                app.model.contacts.rows.len(),
                app.model.contacts.count(view),
            ),
            None => (
                search::SearchScope::Items(&location),
                app.model.drive.items.len(),
                app.model.drive.raw.len(),
            ),
        };
        search::render_search_input(
            f,
            search_area,
            search::SearchBar {
                query: &app.model.ui.search_query,
                active: app.model.ui.search_mode,
                scope,
                shown,
                total,
                vim_mode: app.model.ui.vim_mode,
            },
        );
    }

    legend::render_legend(f, layout_info.legend_area, legend_ctx);

    let (item_count, selected_count) = if is_contacts {
        (app.model.contacts.rows.len(), 0)
    } else {
        (
            app.model.drive.items.len(),
            app.model.drive.items.iter().filter(|item| item.selected).count(),
        )
    };
    status_bar::render_status_bar(
        f,
        layout_info.status_area,
        StatusInfo {
            location: &location,
            item_count,
            selected_count,
            sort_mode: app.model.ui.sort_mode.as_str(),
            sort_reverse: app.model.ui.sort_reverse,
            last_load_time_ms: app.model.performance.last_load_time_ms,
            moving: app.model.ui.drag.as_ref().map(|drag| drag.items().len()),
            connection_error: app.model.ui.connection_error.as_deref(),
        },
    );

    // Popups, topmost last
    let menu = app
        .model
        .ui
        .context_menu
        .as_ref()
        .map(|menu| context_menu::render_context_menu(f, menu));

    if let Some(item) = &app.model.ui.preview {
        preview::render_preview(f, item, &mut app.image_state_map);
    }

    if let Some(dialog) = &app.model.ui.dialog {
        dialogs::render_dialog(f, dialog);
    }

    toast::render_toasts(f, size, app.model.ui.toasts.iter().map(|(toast, _)| toast));

    app.areas = ScreenAreas {
        sidebar: layout_info.sidebar_area,
        list_inner,
        rows: drawn,
        menu,
    };
}
