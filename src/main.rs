use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Terminal,
};
use tracing::info;

use sensorscope::{
    events, export, telemetry, ui, App, FileSource, PlotData, RangeLimits, SensorReport, Settings,
    Theme, ThemeChoice,
};

#[derive(Parser, Debug)]
#[command(name = "sensorscope")]
#[command(about = "Terminal viewer for environmental-sensor JSON reports")]
struct Args {
    /// Path to the sensor report JSON file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Index of the sensor to show first
    #[arg(short, long)]
    sensor: Option<usize>,

    /// Start date (dd.mm.yyyy or yyyy-mm-dd)
    #[arg(long)]
    from: Option<String>,

    /// End date (dd.mm.yyyy or yyyy-mm-dd)
    #[arg(long)]
    to: Option<String>,

    /// Settings file (TOML); defaults to ./sensorscope.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Seconds between checks of the report file for changes
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Write logs to this file (level from RUST_LOG, default info)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Export the chart for the chosen sensor and range to JSON and exit
    #[arg(short, long, conflicts_with = "list_sensors")]
    export: Option<PathBuf>,

    /// Print the sensors in the report and exit
    #[arg(long)]
    list_sensors: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded settings.
    fn merge_into(self, mut settings: Settings) -> Settings {
        if let Some(file) = self.file {
            settings.file = file;
        }
        if let Some(sensor) = self.sensor {
            settings.sensor = sensor;
        }
        if self.from.is_some() {
            settings.start = self.from;
        }
        if self.to.is_some() {
            settings.end = self.to;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(refresh) = self.refresh {
            settings.refresh_secs = refresh;
        }
        settings
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    telemetry::init(args.log.as_deref())?;

    let settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;
    let list_sensors = args.list_sensors;
    let export_path = args.export.clone();
    let settings = args.merge_into(settings);
    info!(?settings, "resolved settings");

    // Validate dates up front so typos fail before the terminal is taken over
    let start = settings.start_date()?;
    let end = settings.end_date()?;

    if list_sensors {
        return list_report_sensors(&settings.file);
    }

    // Handle export mode (non-interactive)
    if let Some(export_path) = export_path {
        return export_to_file(&settings, start, end, &export_path);
    }

    let source = Box::new(FileSource::new(&settings.file));
    let app = App::new(source, Theme::from_choice(settings.theme)).with_selection(
        settings.sensor,
        start,
        end,
    );
    run_tui(app, Duration::from_secs(settings.refresh_secs.max(1)))
}

/// Print index, id and type of every sensor in the report
fn list_report_sensors(path: &Path) -> Result<()> {
    let report = SensorReport::load(path)?;
    for (index, sensor) in report.sensors.iter().enumerate() {
        println!("{:>3}  {:<12} {}", index, sensor.id, sensor.kind);
    }
    Ok(())
}

/// Build the chart for the configured sensor and range and write it as JSON
fn export_to_file(
    settings: &Settings,
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
    export_path: &Path,
) -> Result<()> {
    let report = SensorReport::load(&settings.file)?;
    let Some(sensor) = report.sensor(settings.sensor) else {
        bail!(
            "Sensor index {} out of range (report has {} sensors)",
            settings.sensor,
            report.sensors.len()
        );
    };
    let Some((first, last)) = report.bounds() else {
        bail!("Report contains no readings");
    };

    let range = RangeLimits::from_bounds(first, last).select(start, end);
    let plot = PlotData::build(&report, settings.sensor, range);
    export::write_plot(export_path, &plot, Some(sensor))?;

    println!(
        "Exported {} readings of {} to: {}",
        plot.len(),
        sensor.kind,
        export_path.display()
    );
    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(mut app: App, refresh_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    // Fetch the report once up front
    let _ = app.reload_data();

    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();
    let mut control_areas: Vec<Rect> = Vec::new();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                control_areas.clear();
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
                    .intersection(area);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(3), // Controls
                Constraint::Min(6),    // Chart
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::controls::render(frame, app, chunks[1]);
            ui::chart::render(frame, app, chunks[2]);
            ui::common::render_status_bar(frame, app, chunks[3]);

            control_areas = ui::controls::layout(chunks[1]).to_vec();

            // Overlays
            if let Some(sensor_area) = control_areas.first() {
                ui::controls::render_dropdown(frame, app, *sensor_area, area);
            }
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, &control_areas),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Pick up a rewritten report file
        if last_refresh.elapsed() >= refresh_interval {
            let _ = app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
