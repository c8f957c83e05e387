use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use itertools::Itertools;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use typi::{
    app::{App, Control},
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore, StorageBackend},
    corpus::{catalog, TextProvider},
    error::StorageError,
    export::export_csv,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    script::Segmentation,
    storage::{FileStorage, MemoryStorage, SqliteStorage, Storage},
    store::{ResultStore, SortKey, SortOrder},
    ui::screen::draw,
};

const TICK_RATE_MS: u64 = 100;

/// typing speed test tui with per-script wpm, timed mode and progress tracking
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing speed test for the terminal. Latin and Burmese texts, untimed or countdown sessions, a result history with trend feedback."
)]
pub struct Cli {
    /// practice category id (see --list-categories)
    #[clap(short = 'c', long)]
    category: Option<String>,

    /// run a timed session of this many seconds
    #[clap(short = 's', long)]
    secs: Option<u32>,

    /// type this text instead of one from the corpus
    #[clap(short = 't', long)]
    text: Option<String>,

    /// how burmese words are counted for wpm
    #[clap(long, value_enum)]
    segmentation: Option<Segmentation>,

    /// where results are kept
    #[clap(long, value_enum)]
    storage: Option<StorageBackend>,

    /// print the category catalog and exit
    #[clap(long)]
    list_categories: bool,

    /// print aggregates and past results and exit
    #[clap(long)]
    history: bool,

    /// column to sort --history by
    #[clap(long, value_enum, default_value_t = SortKey::Date)]
    sort_by: SortKey,

    /// direction to sort --history in
    #[clap(long, value_enum, default_value_t = SortOrder::Desc)]
    order: SortOrder,

    /// delete all stored results and exit
    #[clap(long)]
    clear_history: bool,

    /// write stored results as csv to this path and exit
    #[clap(long, value_name = "PATH")]
    export_csv: Option<PathBuf>,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Config with this run's flags layered on top.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(category) = &self.category {
            config.category = category.clone();
        }
        if let Some(secs) = self.secs {
            config.timed_secs = (secs > 0).then_some(secs);
        }
        if let Some(seg) = self.segmentation {
            config.segmentation = seg;
        }
        if let Some(storage) = self.storage {
            config.storage = storage;
        }
        config
    }

    fn is_batch(&self) -> bool {
        self.list_categories || self.history || self.clear_history || self.export_csv.is_some()
    }
}

fn open_storage(backend: StorageBackend) -> Result<Box<dyn Storage>, StorageError> {
    let Some(location) = AppDirs::results_location(backend) else {
        log::warn!("no state directory, results will not outlive this run");
        return Ok(Box::new(MemoryStorage::new()));
    };
    let storage: Box<dyn Storage> = match backend {
        StorageBackend::File => Box::new(FileStorage::new(location)),
        StorageBackend::Sqlite => Box::new(SqliteStorage::open(location)?),
    };
    Ok(storage)
}

fn open_store(backend: StorageBackend) -> ResultStore<Box<dyn Storage>> {
    let storage = open_storage(backend).unwrap_or_else(|e| {
        log::warn!("could not open {backend:?} storage, keeping results in memory: {e}");
        Box::new(MemoryStorage::new()) as Box<dyn Storage>
    });
    ResultStore::load(storage)
}

fn print_categories() {
    let lines = catalog()
        .into_iter()
        .map(|info| format!("{:<16}{:<16}{}", info.id, info.display_name, info.description))
        .join("\n");
    println!("{lines}");
}

fn print_history<S: Storage>(store: &ResultStore<S>, sort_by: SortKey, order: SortOrder) {
    let agg = store.aggregates();
    println!(
        "tests: {}  avg wpm: {}  avg accuracy: {}%  best wpm: {}  best accuracy: {}%",
        agg.count, agg.average_wpm, agg.average_accuracy, agg.best_wpm, agg.best_accuracy
    );
    if store.is_empty() {
        return;
    }
    println!(
        "{:<26}{:>5}{:>6}{:>7}{:>8}  text",
        "date", "wpm", "acc", "time", "errors"
    );
    let rows = store
        .sorted(sort_by, order)
        .into_iter()
        .map(|r| {
            format!(
                "{:<26}{:>5}{:>5}%{:>6}s{:>8}  {}",
                r.completed_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                r.wpm,
                r.accuracy,
                r.elapsed_seconds,
                r.error_count,
                r.category
            )
        })
        .join("\n");
    println!("{rows}");
}

fn run_batch(cli: &Cli, config: &Config) -> Result<(), Box<dyn Error>> {
    logging::init_stderr_logger();

    if cli.list_categories {
        print_categories();
    }
    if !(cli.history || cli.clear_history || cli.export_csv.is_some()) {
        return Ok(());
    }

    let mut store = open_store(config.storage);
    if let Some(path) = &cli.export_csv {
        let count = export_csv(path, store.results())?;
        println!("exported {count} results to {}", path.display());
    }
    if cli.history {
        print_history(&store, cli.sort_by, cli.order);
    }
    if cli.clear_history {
        store.clear()?;
        println!("history cleared");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config_store = FileConfigStore::new();
    let config = cli.apply(config_store.load());

    if cli.save_config {
        config_store.save(&config)?;
    }

    if cli.is_batch() {
        return run_batch(&cli, &config);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        logging::init_file_logger(&path)?;
    }

    let provider = TextProvider::new(config.formatter_settings())?;
    let store = open_store(config.storage);
    let mut app = App::new(&config, cli.text.clone(), provider, store, SystemClock);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome
}

fn start_tui<B: Backend, S: Storage>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| draw(app, f))?;
        if app.handle_event(runner.step()) == Control::Quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["typi"]);
        assert_eq!(cli.category, None);
        assert_eq!(cli.secs, None);
        assert!(!cli.is_batch());
        assert_eq!(cli.sort_by, SortKey::Date);
        assert_eq!(cli.order, SortOrder::Desc);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "typi",
            "-c",
            "burmese",
            "-s",
            "30",
            "--segmentation",
            "whitespace",
            "--storage",
            "sqlite",
        ]);
        let config = cli.apply(Config::default());
        assert_eq!(config.category, "burmese");
        assert_eq!(config.timed_secs, Some(30));
        assert_eq!(config.segmentation, Segmentation::Whitespace);
        assert_eq!(config.storage, StorageBackend::Sqlite);
    }

    #[test]
    fn test_zero_secs_means_untimed() {
        let base = Config {
            timed_secs: Some(60),
            ..Config::default()
        };
        let config = Cli::parse_from(["typi", "-s", "0"]).apply(base);
        assert_eq!(config.timed_secs, None);
    }

    #[test]
    fn test_batch_flags() {
        assert!(Cli::parse_from(["typi", "--history", "--sort-by", "wpm", "--order", "asc"]).is_batch());
        assert!(Cli::parse_from(["typi", "--export-csv", "out.csv"]).is_batch());
        assert!(Cli::parse_from(["typi", "--list-categories"]).is_batch());
    }

    #[test]
    fn test_custom_text_flag() {
        let cli = Cli::parse_from(["typi", "--text", "hello there"]);
        assert_eq!(cli.text.as_deref(), Some("hello there"));
    }
}
