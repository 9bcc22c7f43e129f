use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::loader::{self, DataSource, DATA_PATH};
use crate::map::MapView;
use crate::output::{self, OutputFormat};
use crate::session::Session;
use crate::view::{Action, CategoryFilter, SortDirection, SortKey, ViewState};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn print_banner() {
    eprintln!("{}", ":: hotelboard :: hotel lead dashboard ::".bold());
    eprintln!();
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label, value);
}

fn render_custom_help() -> String {
    let cmd = CliArgs::command();
    let mut out = format!(
        "{} {}\n",
        cmd.get_name(),
        cmd.get_version().unwrap_or_default()
    );
    if let Some(long_about) = cmd.get_long_about().or(cmd.get_about()) {
        out.push_str(&format!("{long_about}\n"));
    }
    out.push_str(&format!("\nUsage: {} [OPTIONS]\n", cmd.get_name()));

    let mut headings: Vec<&str> = Vec::new();
    for arg in cmd.get_arguments().filter(|a| !a.is_hide_set()) {
        let heading = arg.get_help_heading().unwrap_or("Options");
        if !headings.contains(&heading) {
            headings.push(heading);
        }
    }

    for heading in headings {
        out.push_str(&format!("\n{heading}:\n"));
        let args = cmd
            .get_arguments()
            .filter(|a| !a.is_hide_set())
            .filter(|a| a.get_help_heading().unwrap_or("Options") == heading);
        for arg in args {
            let mut flags: Vec<String> = Vec::new();
            if let Some(short) = arg.get_short() {
                flags.push(format!("-{short}"));
            }
            if let Some(long) = arg.get_long() {
                flags.push(format!("--{long}"));
            }
            for alias in arg.get_visible_aliases().unwrap_or_default() {
                flags.push(format!("--{alias}"));
            }
            let mut line = flags.join(", ");
            if arg.get_action().takes_values() {
                let value_name = arg
                    .get_value_names()
                    .and_then(|names| names.first())
                    .map(|name| name.as_str())
                    .unwrap_or("VALUE");
                line.push_str(&format!(" <{value_name}>"));
            }
            out.push_str(&format!("  {line}\n"));
            if let Some(help) = arg.get_help() {
                out.push_str(&format!("          {}\n", help.to_string().trim()));
            }
        }
    }
    out
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

#[derive(Clone, Debug)]
struct RunConfig {
    source: DataSource,
    timeout: Duration,
    state: ViewState,
    map: MapView,
    output: Option<PathBuf>,
    output_format: OutputFormat,
    no_color: bool,
    interactive: bool,
    list_categories: bool,
}

fn resolve_source(args: &CliArgs, cfg: &ConfigFile) -> Result<DataSource, String> {
    if let Some(url) = args.url.as_deref() {
        return Ok(DataSource::Url(url.trim().to_string()));
    }
    if let Some(data) = args.data.as_deref() {
        return Ok(DataSource::File(config::expand_tilde(data.trim())));
    }
    match (cfg.url.as_deref(), cfg.data.as_deref()) {
        (Some(_), Some(_)) => Err("config sets both 'url' and 'data', keep only one".to_string()),
        (Some(url), None) => Ok(DataSource::Url(url.trim().to_string())),
        (None, Some(data)) => Ok(DataSource::File(config::expand_tilde(data.trim()))),
        (None, None) => Ok(DataSource::File(PathBuf::from(".").join(DATA_PATH))),
    }
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let source = resolve_source(&args, &cfg)?;
    let timeout = Duration::from_secs(args.timeout.or(cfg.timeout).unwrap_or(DEFAULT_TIMEOUT_SECS));

    let sort_raw = args.sort.or(cfg.sort);
    let sort_key = match sort_raw.as_deref() {
        Some(raw) => SortKey::parse(raw).ok_or_else(|| format!("invalid sort '{raw}'"))?,
        None => SortKey::Rating,
    };
    let direction_raw = args.direction.or(cfg.direction);
    let direction = match direction_raw.as_deref() {
        Some(raw) => {
            SortDirection::parse(raw).ok_or_else(|| format!("invalid direction '{raw}'"))?
        }
        None => SortDirection::Desc,
    };

    let page_size = args.page_size.or(cfg.page_size);
    let page_size = match page_size {
        Some(n) => NonZeroUsize::new(n).ok_or("invalid page-size, expected positive integer")?,
        None => crate::view::DEFAULT_PAGE_SIZE,
    };
    let page = args.page.or(cfg.page).unwrap_or(1);
    if page == 0 {
        return Err("invalid page, expected positive integer".to_string());
    }

    let state = ViewState {
        search: args.search.or(cfg.search).unwrap_or_default(),
        category: args
            .category
            .or(cfg.category)
            .map(|c| CategoryFilter::parse(&c))
            .unwrap_or_default(),
        sort_key,
        direction,
        page,
        page_size,
    };

    let defaults = MapView::default();
    let map = MapView {
        center: cfg.map_center.unwrap_or(defaults.center),
        zoom: cfg.map_zoom.unwrap_or(defaults.zoom),
    };

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde(p.trim()));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}'"))?,
        None => output
            .as_ref()
            .and_then(|p| output::infer_format_from_path(&p.to_string_lossy()))
            .unwrap_or(OutputFormat::Text),
    };

    let no_color = args.no_color || cfg.no_color.unwrap_or(false) || output.is_some();

    Ok(RunConfig {
        source,
        timeout,
        state,
        map,
        output,
        output_format,
        no_color,
        interactive: args.interactive,
        list_categories: args.list_categories,
    })
}

fn loading_spinner() -> Result<ProgressBar, String> {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_style(
        ProgressStyle::with_template(":: {spinner} {msg} [{elapsed_precise}]")
            .map_err(|e| format!("failed to build spinner style: {e}"))?,
    );
    pb.set_message("Loading hotel data...");
    Ok(pb)
}

async fn load_into(session: &mut Session, run: &RunConfig) -> Result<(), String> {
    let pb = loading_spinner()?;
    let result = loader::load(&run.source, run.timeout).await;
    pb.finish_and_clear();
    session.finish_load(result);
    Ok(())
}

async fn write_output(run: &RunConfig, body: &[u8]) -> Result<(), String> {
    match run.output.as_ref() {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| format!("failed to create output directory: {e}"))?;
            }
            tokio::fs::write(path, body)
                .await
                .map_err(|e| format!("failed to write output file {}: {e}", path.display()))?;
            log::info!("dashboard written to {}", path.display());
            Ok(())
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(body)
                .await
                .map_err(|e| format!("failed to write to stdout: {e}"))?;
            stdout
                .flush()
                .await
                .map_err(|e| format!("failed to flush stdout: {e}"))
        }
    }
}

/// One line of input in interactive mode.
#[derive(Clone, Debug, PartialEq)]
enum Command {
    View(Action),
    Next,
    Show,
    Reload,
    Stats,
    Categories,
    Help,
    Quit,
}

const INTERACTIVE_HELP: &str = "\
commands:
  search [TEXT]         filter by name or address (empty clears)
  category LABEL|all    filter by star segment
  categories            list selectable star segments
  sort FIELD [asc|desc] sort by name, rating, reviews or category
                        (repeating a field without direction flips it)
  next | prev           move one page
  page N                jump to page N
  show                  redraw the table
  stats                 print summary statistics
  reload                fetch the data again
  help                  this text
  quit                  leave
";

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word.to_lowercase().as_str() {
        "" | "show" | "ls" => Command::Show,
        "search" | "/" => Command::View(Action::SetSearch(rest.to_string())),
        "category" | "segment" => {
            if rest.is_empty() {
                return Err("usage: category LABEL|all".to_string());
            }
            Command::View(Action::SetCategory(CategoryFilter::parse(rest)))
        }
        "categories" => Command::Categories,
        "sort" => {
            let mut parts = rest.split_whitespace();
            let raw = parts.next().ok_or("usage: sort FIELD [asc|desc]")?;
            let key = SortKey::parse(raw).ok_or_else(|| format!("unknown sort field '{raw}'"))?;
            match parts.next() {
                Some(dir) => {
                    let direction = SortDirection::parse(dir)
                        .ok_or_else(|| format!("unknown direction '{dir}'"))?;
                    Command::View(Action::SetSort(key, direction))
                }
                None => Command::View(Action::SortBy(key)),
            }
        }
        "next" | "n" => Command::Next,
        "prev" | "previous" | "p" => Command::View(Action::PreviousPage),
        "page" => {
            let page = rest
                .parse::<usize>()
                .map_err(|_| format!("invalid page '{rest}'"))?;
            Command::View(Action::GoToPage(page))
        }
        "reload" | "refresh" => Command::Reload,
        "stats" => Command::Stats,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(command)
}

fn print_stats(session: &Session) {
    let snapshot = session.snapshot();
    for (title, value, caption) in output::stat_cards(&snapshot.statistics.summary) {
        println!(":: {:<16}: {} {}", title, value.bold().cyan(), caption.dimmed());
    }
}

async fn run_interactive(session: &mut Session, run: &RunConfig) -> Result<(), String> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print!("{}", String::from_utf8_lossy(&output::render_text(&session.snapshot())));
    loop {
        eprint!("{} ", "hotelboard>".bold().green());
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read stdin: {e}")),
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e.red());
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => {
                eprint!("{INTERACTIVE_HELP}");
                continue;
            }
            Command::Stats => {
                print_stats(session);
                continue;
            }
            Command::Categories => {
                for option in crate::view::category_options(session.hotels()) {
                    println!("{option}");
                }
                continue;
            }
            Command::Reload => {
                if !session.begin_refresh() {
                    eprintln!("{}", "a load is already in progress".yellow());
                    continue;
                }
                load_into(session, run).await?;
            }
            Command::Next => session.next_page(),
            Command::View(action) => session.dispatch(action),
            Command::Show => {}
        }
        print!("{}", String::from_utf8_lossy(&output::render_text(&session.snapshot())));
    }
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }

    if run.list_categories {
        let hotels = loader::load_or_empty(&run.source, run.timeout).await;
        for option in crate::view::category_options(&hotels) {
            println!("{option}");
        }
        return Ok(());
    }

    if run.interactive || run.output.is_some() {
        print_banner();
        format_kv_line("Source", &run.source.describe());
        if let Some(path) = run.output.as_ref() {
            format_kv_line("Output", &path.display().to_string());
        }
        eprintln!();
    }

    let mut session = Session::new(run.state.clone(), run.map);
    load_into(&mut session, &run).await?;

    if run.interactive {
        return run_interactive(&mut session, &run).await;
    }

    let body = output::render(run.output_format, &session.snapshot());
    write_output(&run, &body).await
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", render_custom_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                print!("{}", CliArgs::command().render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    init_logging(args.verbose);

    if args.init_config {
        let path = match args.config.as_deref() {
            Some(p) => config::expand_tilde(p),
            None => config::default_config_path()
                .ok_or("could not determine home directory for default config")?,
        };
        config::ensure_default_config_file(&path)?;
        println!("config file ready at {}", path.display());
        return Ok(());
    }

    let cfg = match args.config.as_deref() {
        Some(p) => config::load_config(&config::expand_tilde(p), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn defaults_without_config() {
        let args = CliArgs::parse_from(["hotelboard"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.source, DataSource::File(PathBuf::from("./hotels.json")));
        assert_eq!(run.state, ViewState::default());
        assert_eq!(run.timeout, Duration::from_secs(10));
        assert_eq!(run.output_format, OutputFormat::Text);
        assert!(!run.no_color);
    }

    #[test]
    fn cli_overrides_config() {
        let args = CliArgs::parse_from(["hotelboard", "-S", "name", "-r", "asc", "-z", "5"]);
        let cfg = ConfigFile {
            sort: Some("reviews".to_string()),
            direction: Some("desc".to_string()),
            page_size: Some(20),
            search: Some("grand".to_string()),
            url: Some("http://localhost:3000".to_string()),
            ..ConfigFile::default()
        };
        let run = build_run_config(args, cfg).unwrap();
        assert_eq!(run.state.sort_key, SortKey::Name);
        assert_eq!(run.state.direction, SortDirection::Asc);
        assert_eq!(run.state.page_size.get(), 5);
        assert_eq!(run.state.search, "grand");
        assert_eq!(run.source, DataSource::Url("http://localhost:3000".to_string()));
    }

    #[test]
    fn output_format_is_inferred_and_disables_color() {
        let args = CliArgs::parse_from(["hotelboard", "-o", "dash.html"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.output_format, OutputFormat::Html);
        assert!(run.no_color);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad = [
            vec!["hotelboard", "-S", "price"],
            vec!["hotelboard", "-p", "0"],
            vec!["hotelboard", "-z", "0"],
            vec!["hotelboard", "-d", "a.json", "-u", "http://x/"],
            vec!["hotelboard", "-A", "xml"],
        ];
        for argv in bad {
            let args = CliArgs::parse_from(argv.clone());
            assert!(
                build_run_config(args, ConfigFile::default()).is_err(),
                "{argv:?} accepted"
            );
        }
        let cfg = ConfigFile {
            page_size: Some(0),
            ..ConfigFile::default()
        };
        assert!(build_run_config(CliArgs::parse_from(["hotelboard"]), cfg).is_err());
    }

    #[test]
    fn interactive_commands_map_to_actions() {
        assert_eq!(
            parse_command("search Grand Hotel").unwrap(),
            Command::View(Action::SetSearch("Grand Hotel".to_string()))
        );
        assert_eq!(
            parse_command("search").unwrap(),
            Command::View(Action::SetSearch(String::new()))
        );
        assert_eq!(
            parse_command("sort reviews").unwrap(),
            Command::View(Action::SortBy(SortKey::Reviews))
        );
        assert_eq!(
            parse_command("sort name asc").unwrap(),
            Command::View(Action::SetSort(SortKey::Name, SortDirection::Asc))
        );
        assert_eq!(
            parse_command("category all").unwrap(),
            Command::View(Action::SetCategory(CategoryFilter::All))
        );
        assert_eq!(
            parse_command("page 3").unwrap(),
            Command::View(Action::GoToPage(3))
        );
        assert_eq!(parse_command("next").unwrap(), Command::Next);
        assert_eq!(parse_command("  ").unwrap(), Command::Show);
        assert!(parse_command("page x").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn help_lists_every_heading() {
        let help = render_custom_help();
        assert!(help.contains("Input:"));
        assert!(help.contains("View:"));
        assert!(help.contains("--page-size <N>"));
    }
}
