use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::info;

use folio_core::{AppConfig, Portfolio, TypewriterAnimator};
use folio_tui::{
    app::{App, Mode, NAVBAR_HEIGHT, STATUS_BAR_HEIGHT},
    event::{next_wake, spawn_event_reader, AppEvent, Wake},
    input::{handle_key_event, Action},
    keymap::Keymap,
    load_theme,
    scroll::ScrollConfigExt,
    widgets::{NavbarWidget, PageWidget, PopupWidget, StatusBarWidget},
    TypewriterFrame, TypewriterTask,
};

pub async fn run(config: Arc<AppConfig>, portfolio: Portfolio) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);
    let theme = load_theme(&config.ui.theme);

    let phrases = config
        .typing
        .phrases
        .clone()
        .unwrap_or_else(|| portfolio.profile.roles.clone());
    let animator = TypewriterAnimator::new(phrases, config.typewriter_timing()?)?;

    let title = format!("{} - folio", portfolio.profile.name);
    let mut app = App::new(config.clone(), portfolio, theme)?;
    info!(theme = %config.ui.theme.name, "starting folio");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(title))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &keymap, animator).await;

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keymap: &Keymap,
    animator: TypewriterAnimator,
) -> Result<()> {
    let (typed_tx, mut typed_rx) = mpsc::unbounded_channel::<TypewriterFrame>();
    // Aborted when dropped at the end of this function
    let _typewriter = TypewriterTask::spawn(animator, typed_tx);

    let mut events = spawn_event_reader();
    let tick_rate = Duration::from_millis(app.config.ui.tick_rate_ms);
    let frame_duration = app.config.ui.scroll.frame_duration();

    let size = terminal.size()?;
    app.resize(size.width, size.height);

    loop {
        app.update_scroll_animation();

        terminal.draw(|frame| draw(frame, app))?;

        let timeout = if app.needs_fast_update() {
            frame_duration
        } else {
            tick_rate
        };

        match next_wake(&mut typed_rx, &mut events, timeout).await {
            Wake::Frame(frame) => app.apply_typewriter_frame(frame),
            Wake::Event(AppEvent::Key(key)) => {
                app.clear_status();
                let action = handle_key_event(key, app, keymap);
                if action == Action::PendingG {
                    app.pending_key = Some('g');
                } else {
                    app.clear_pending_key();
                }
                handle_action(app, action);
            }
            Wake::Event(AppEvent::Resize(width, height)) => app.resize(width, height),
            Wake::Event(AppEvent::Scroll(rows)) => app.scroll_by(rows),
            Wake::Event(AppEvent::Tick) | Wake::Tick => {}
            Wake::Closed => bail!("terminal event reader stopped"),
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(NAVBAR_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .split(frame.area());

    NavbarWidget::render(frame, chunks[0], app);
    PageWidget::render(frame, chunks[1], app);
    StatusBarWidget::render(frame, chunks[2], app);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, app);
    }
}

fn handle_action(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::ScrollDown => app.scroll_lines(1),
        Action::ScrollUp => app.scroll_lines(-1),
        Action::ScrollHalfPageDown => app.scroll_half_page(1),
        Action::ScrollHalfPageUp => app.scroll_half_page(-1),
        Action::ScrollPageDown => app.scroll_page(1),
        Action::ScrollPageUp => app.scroll_page(-1),
        Action::JumpToTop => app.jump_to_top(),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::NextSection => app.next_section(),
        Action::PrevSection => app.prev_section(),
        Action::JumpToSection(index) => {
            if !app.jump_to_nav(index) {
                app.set_status(format!("No section {}", index + 1));
            }
        }
        Action::CycleFilter => app.cycle_filter(),
        Action::NextProject => app.next_project(),
        Action::PrevProject => app.prev_project(),
        Action::OpenProject => app.open_project(),
        Action::OpenRepo => app.open_repo(),
        Action::ToggleHelp => app.toggle_help(),
        Action::ExitMode => app.exit_mode(),
        Action::PendingG | Action::None => {}
    }
}
