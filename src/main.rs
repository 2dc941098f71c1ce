use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    collections::HashMap,
    fs, io,
    sync::Mutex,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use drivetui::{api, cache, config, logic, messages, model, services};
use drivetui::{DisplayMode, SortMode};

mod app;
mod handlers;
mod ui;

use api::DriveClient;
use cache::CacheDb;
use config::Config;
use messages::{ActionReport, Command};
use model::Location;
use services::api::{ApiRequest, ApiResponse};
use services::{DialogBroker, DialogRequest, PollSchedule};

/// Cloud Drive TUI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to <tmp>/drivetui-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl, ^D/U, ^F/B, gg/G)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Open a public directory link (https://host/d/<uuid>#<key>) read-only
    #[arg(long)]
    link: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ImageMetadata {
    pub dimensions: Option<(u32, u32)>,
    pub format: Option<String>,
    pub file_size: u64,
}

pub enum ImagePreviewState {
    Loading,
    Ready {
        protocol: ratatui_image::protocol::StatefulProtocol,
        metadata: ImageMetadata,
    },
    Failed {
        metadata: ImageMetadata,
    },
}

impl std::fmt::Debug for ImagePreviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImagePreviewState::Loading => write!(f, "ImagePreviewState::Loading"),
            ImagePreviewState::Ready { metadata, .. } => f
                .debug_struct("ImagePreviewState::Ready")
                .field("metadata", metadata)
                .field("protocol", &"<StatefulProtocol>")
                .finish(),
            ImagePreviewState::Failed { metadata } => f
                .debug_struct("ImagePreviewState::Failed")
                .field("metadata", metadata)
                .finish(),
        }
    }
}

pub struct App {
    pub model: model::Model,

    config: Config,
    worker: DriveClient,
    cache: CacheDb,
    api_tx: UnboundedSender<ApiRequest>,
    api_rx: UnboundedReceiver<ApiResponse>,
    command_tx: UnboundedSender<Command>,
    command_rx: UnboundedReceiver<Command>,
    action_tx: UnboundedSender<ActionReport>,
    action_rx: UnboundedReceiver<ActionReport>,

    /// Prompt handed to action tasks
    dialogs: DialogBroker,
    dialog_rx: UnboundedReceiver<DialogRequest>,
    /// Question on screen, answered on key press
    active_dialog: Option<DialogRequest>,

    poll_schedule: PollSchedule,
    next_ticket: u64,
    /// Link given on the command line, kept to retry the password prompt
    public_link: Option<logic::public_link::ParsedLink>,

    image_picker: Option<ratatui_image::picker::Picker>,
    image_update_tx: UnboundedSender<(String, ImagePreviewState)>,
    image_update_rx: UnboundedReceiver<(String, ImagePreviewState)>,
    /// Decoded thumbnails by item uuid
    image_state_map: HashMap<String, ImagePreviewState>,

    icon_renderer: ui::icons::IconRenderer,

    /// Screen areas of the last frame, for mouse hit-testing
    areas: ui::layout::ScreenAreas,
    pointer: handlers::mouse::PointerState,
}

impl App {
    fn new(config: Config, link: Option<logic::public_link::ParsedLink>) -> Result<Self> {
        let worker = DriveClient::new(config.base_url.clone(), config.api_key.clone());
        let cache = CacheDb::new()?;

        // Spawn API service worker
        let (api_tx, api_rx) = services::api::spawn_api_service(worker.clone());
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (dialogs, dialog_rx) = DialogBroker::new();

        // Create channel for image updates
        let (image_update_tx, image_update_rx) = mpsc::unbounded_channel();

        // Initialize image preview protocol picker
        let (image_picker, image_font_size) = if config.image_preview_enabled {
            let mut picker = match ratatui_image::picker::Picker::from_query_stdio() {
                Ok(p) => p,
                Err(e) => {
                    debug!("Image preview: Failed to detect terminal: {}", e);
                    ratatui_image::picker::Picker::from_fontsize((8, 16)) // Fallback font size
                }
            };

            let font_size = picker.font_size();
            debug!("Image font size: {}x{}", font_size.0, font_size.1);

            match config.image_protocol.to_lowercase().as_str() {
                "auto" => debug!("Image preview: Auto-detected protocol"),
                "iterm2" => picker.set_protocol_type(ratatui_image::picker::ProtocolType::Iterm2),
                "kitty" => picker.set_protocol_type(ratatui_image::picker::ProtocolType::Kitty),
                "sixel" => picker.set_protocol_type(ratatui_image::picker::ProtocolType::Sixel),
                "halfblocks" => {
                    picker.set_protocol_type(ratatui_image::picker::ProtocolType::Halfblocks)
                }
                unknown => warn!(
                    "Image preview: Unknown protocol '{}', using auto-detect",
                    unknown
                ),
            }

            (Some(picker), Some(font_size))
        } else {
            debug!("Image preview disabled in config");
            (None, None)
        };

        let start = if link.is_some() {
            Location::PublicLink {
                link_uuid: String::new(),
                key: String::new(),
                password: None,
                path: Vec::new(),
            }
        } else {
            Location::Drive(Vec::new())
        };

        let mut model = model::Model::new(start, config.vim_mode, config.overscan);
        model.ui.display_mode = DisplayMode::TimestampAndSize; // Start with most info
        model.ui.sort_mode = SortMode::Alphabetical;
        model.ui.image_font_size = image_font_size;

        let mut app = App {
            model,
            poll_schedule: PollSchedule::new(Duration::from_millis(config.poll_interval_ms)),
            config,
            worker,
            cache,
            api_tx,
            api_rx,
            command_tx,
            command_rx,
            action_tx,
            action_rx,
            dialogs,
            dialog_rx,
            active_dialog: None,
            next_ticket: 0,
            public_link: None,
            image_picker,
            image_update_tx,
            image_update_rx,
            image_state_map: HashMap::new(),
            icon_renderer: ui::icons::IconRenderer::default(),
            areas: ui::layout::ScreenAreas::default(),
            pointer: handlers::mouse::PointerState::default(),
        };

        app.restore_cached_state();

        match link {
            Some(link) => app.open_public_link(link),
            None => {
                app.model.drive.loading = true;
                let _ = app.api_tx.send(ApiRequest::BaseFolder);
            }
        }

        Ok(app)
    }

    /// Fill the model from the previous run's cache so lists show at once
    fn restore_cached_state(&mut self) {
        services::queries::restore(&self.cache, &mut self.model.contacts);

        match self.cache.get_all_directory_sizes() {
            Ok(sizes) => {
                debug!("Restored {} cached directory sizes", sizes.len());
                self.model.drive.directory_sizes = sizes;
            }
            Err(e) => warn!("Failed to load cached directory sizes: {:#}", e),
        }
    }

    /// Handle API responses from background worker
    /// Delegated to handlers::api module
    fn handle_api_response(&mut self, response: ApiResponse) {
        handlers::handle_api_response(self, response);
    }

    fn handle_command(&mut self, command: Command) {
        handlers::handle_command(self, command);
    }
}

fn init_logging(debug: bool) -> Result<()> {
    if !debug {
        return Ok(());
    }

    let path = std::env::temp_dir().join("drivetui-debug.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open debug log {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drivetui=debug".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    init_logging(args.debug)?;
    if args.debug {
        info!("Debug mode enabled");
    }

    // Determine config file path
    let config_path = config::get_config_path(args.config)?;
    debug!("Loading config from: {:?}", config_path);

    // Load configuration
    let config_str = fs::read_to_string(&config_path)?;
    let mut config = Config::from_yaml(&config_str)?;

    // Override config with CLI flags
    if args.vim {
        config.vim_mode = true;
    }

    let link = match args.link {
        Some(url) => Some(
            logic::public_link::parse_link(&url)
                .with_context(|| format!("Not a valid public link: {}", url))?,
        ),
        None => None,
    };

    // Initialize app
    let mut app = App::new(config, link)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app).await;

    // Answer a prompt still on screen so its task can finish
    app.cancel_dialog();

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Return result after cleanup
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Clear terminal to remove sixel graphics if needed (brief flash but necessary)
        if app.model.ui.sixel_cleanup_frames > 0 {
            terminal.clear()?;
            app.model.ui.sixel_cleanup_frames = 0;
        }

        // Always render (Elm Architecture approach)
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        app.model.ui.dismiss_expired_toasts();

        if app.model.ui.should_quit {
            break;
        }

        // Process API responses (non-blocking)
        while let Ok(response) = app.api_rx.try_recv() {
            app.handle_api_response(response);
        }

        // Finished actions
        while let Ok(report) = app.action_rx.try_recv() {
            app.apply_action_report(report);
        }

        while let Ok(command) = app.command_rx.try_recv() {
            app.handle_command(command);
        }

        // One prompt at a time; the rest wait in the channel
        if app.active_dialog.is_none() {
            if let Ok(request) = app.dialog_rx.try_recv() {
                app.show_dialog(request);
            }
        }

        // Process image updates from background decoding tasks (non-blocking)
        while let Ok((uuid, image_state)) = app.image_update_rx.try_recv() {
            debug!("Updating image state for {}", uuid);
            app.image_state_map.insert(uuid, image_state);
        }

        app.poll_due_queries(Instant::now());

        // Only prefetch when user has been idle for 300ms
        if app.model.is_idle() {
            app.prefetch_visible();
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handlers::handle_key(app, key);
                }
                Event::Mouse(mouse) => handlers::handle_mouse(app, mouse),
                _ => {}
            }
        }
    }

    Ok(())
}
