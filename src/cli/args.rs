use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "hotelboard",
    version,
    about = "hotel lead dashboard",
    long_about = "Hotelboard loads a hotel lead collection and renders summary statistics, rating and segment charts, a sortable/filterable table and map markers.\n\nExamples:\n  hotelboard -d ./hotels.json\n  hotelboard -u http://localhost:3000/ -s grand -S reviews -r desc\n  hotelboard -d ./hotels.json -o dashboard.html\n  hotelboard -d ./hotels.json --interactive\n\nTip: Use --config to persist defaults and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'n',
        long = "no-color",
        visible_alias = "nc",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'd',
        long = "data",
        visible_alias = "file",
        value_name = "FILE",
        help_heading = "Input",
        help = "Load hotels from a local JSON file (defaults to ./hotels.json)."
    )]
    pub data: Option<String>,

    #[arg(
        short = 'u',
        long = "url",
        value_name = "URL",
        help_heading = "Input",
        help = "Fetch hotels.json from this base URL instead of a local file."
    )]
    pub url: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        visible_alias = "cfg",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.hotelboard/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a commented default config file if none exists, then exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'T',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "Input",
        help = "HTTP timeout for --url in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 's',
        long = "search",
        value_name = "TEXT",
        help_heading = "View",
        help = "Only show hotels whose name or address contains TEXT (case-insensitive)."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'k',
        long = "category",
        visible_alias = "segment",
        value_name = "LABEL",
        help_heading = "View",
        help = "Only show one star segment, or 'all'."
    )]
    pub category: Option<String>,

    #[arg(
        short = 'S',
        long = "sort",
        value_name = "FIELD",
        help_heading = "View",
        help = "Sort field (name, rating, reviews, category)."
    )]
    pub sort: Option<String>,

    #[arg(
        short = 'r',
        long = "direction",
        visible_alias = "dir",
        value_name = "DIR",
        help_heading = "View",
        help = "Sort direction (asc or desc)."
    )]
    pub direction: Option<String>,

    #[arg(
        short = 'p',
        long = "page",
        value_name = "N",
        help_heading = "View",
        help = "Page to show (1-based)."
    )]
    pub page: Option<usize>,

    #[arg(
        short = 'z',
        long = "page-size",
        value_name = "N",
        help_heading = "View",
        help = "Rows per page."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'o',
        long = "output",
        visible_alias = "out",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the dashboard to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "output-format",
        visible_alias = "of",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, html). Inferred from --output when omitted."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'i',
        long = "interactive",
        help_heading = "Output",
        help = "Browse the table interactively from the terminal."
    )]
    pub interactive: bool,

    #[arg(
        long = "list-categories",
        help_heading = "Output",
        help = "Print the selectable star segments and exit."
    )]
    pub list_categories: bool,
}
