mod app;
mod config;
mod content;
mod engine;
mod event;
mod store;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::App;
use event::{AppEvent, EventHandler};
use ui::components::card_view::CardView;
use ui::components::settings_panel::SettingsPanel;
use ui::components::status_bar::StatusBar;

#[derive(Parser)]
#[command(
    name = "firstread",
    version,
    about = "Letter and word flashcards for early readers"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Override the data directory")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Append warnings to this file instead of stderr")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) {
    if let Some(path) = log_file {
        let log_output = OpenOptions::new().create(true).append(true).open(path);
        match log_output {
            Ok(file) => {
                env_logger::Builder::from_default_env()
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .init();
            }
            Err(_) => env_logger::init(),
        }
    } else {
        env_logger::init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref());

    let mut app = App::new(cli.data_dir);

    if let Some(theme_name) = cli.theme {
        if let Some(theme) = ui::theme::Theme::load(&theme_name) {
            let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
            app.theme = theme;
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
            // the tick only exists so the elapsed-time display refreshes
            AppEvent::Tick => {}
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.settings_open {
        handle_settings_key(app, key);
    } else {
        handle_card_key(app, key);
    }
}

fn handle_card_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('s') => app.open_settings(),
        KeyCode::Char(' ') | KeyCode::Down => app.engine.request_advance(),
        KeyCode::Left => app.engine.request_back(),
        KeyCode::Right => app.engine.request_forward(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('s') => app.close_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.settings_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.settings_next(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_left(),
        KeyCode::Right | KeyCode::Char('l') => app.settings_right(),
        KeyCode::Enter | KeyCode::Char(' ') => app.settings_toggle(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.settings_open {
        return;
    }
    if let MouseEventKind::Down(_) = mouse.kind {
        app.engine.request_advance();
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(StatusBar::new(&app.engine, app.theme), layout[0]);
    frame.render_widget(CardView::new(app.engine.current_card(), app.theme), layout[1]);

    let footer = Paragraph::new(Line::from(Span::styled(
        " [Space] Next  [Left] Back  [Right] Forward  [s] Settings  [q] Quit ",
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, layout[2]);

    if app.settings_open {
        let panel = SettingsPanel {
            engine: &app.engine,
            selected: app.settings_selected,
            col: app.settings_col,
            theme: app.theme,
        };
        frame.render_widget(panel, area);
    }
}
