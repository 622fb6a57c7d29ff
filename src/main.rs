// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use xml_translator::app_config::{Config, LogLevel};
use xml_translator::cli_interface::{translate_folder, ConsoleInterface, OutputTarget};
use xml_translator::file_utils::FileManager;
use xml_translator::language_utils::{display_label, LanguageSelector};
use xml_translator::{Controller, Session, TranslateOutcome};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate an XML document or a directory of documents (default command)
    Translate(TranslateArgs),

    /// List the dictionary languages that can be selected
    Languages {
        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Generate shell completions for xml-translator
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// XML document or directory to translate
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// JSON dictionary file
    #[arg(short, long)]
    dictionary: PathBuf,

    /// Dictionary language to use (defaults to the first configured language)
    #[arg(short, long)]
    language: Option<String>,

    /// Output file, or output directory when translating a directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// xml-translator - replace XML text and attribute values from a JSON dictionary
#[derive(Parser, Debug)]
#[command(name = "xml-translator")]
#[command(version)]
#[command(about = "Dictionary-driven XML text replacement")]
#[command(long_about = "xml-translator loads one language from a JSON dictionary and replaces every
XML element text and attribute value that exactly matches a dictionary key.

DICTIONARY FORMAT:
    { \"RU\": { \"Title\": { \"Hello\": \"Привет\" } } }

EXAMPLES:
    xml-translator -d dict.json page.xml               # Writes page.ru.xml
    xml-translator -d dict.json -l EN page.xml         # Use the EN dictionary
    xml-translator -d dict.json -o out.xml page.xml    # Choose the output file
    xml-translator -d dict.json -f pages/              # Translate a directory, overwriting
    xml-translator languages                           # List selectable languages
    xml-translator completions bash > xml-translator.bash

CONFIGURATION:
    Settings are read from conf.json when it exists; defaults are used otherwise.
    The file is never written by the tool.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// XML document or directory to translate
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// JSON dictionary file
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Dictionary language to use (defaults to the first configured language)
    #[arg(short, long)]
    language: Option<String>,

    /// Output file, or output directory when translating a directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for log level
    fn get_style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let (emoji, colour) = Self::get_style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through
    // log::set_max_level once the configuration is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "xml-translator", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Languages { config_path }) => list_languages(&config_path),
        Some(Commands::Translate(args)) => run_translate(args),
        None => {
            // Default behavior - use top-level args
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;
            let dictionary = cli.dictionary.ok_or_else(|| {
                anyhow!("--dictionary is required when no subcommand is specified")
            })?;

            let translate_args = TranslateArgs {
                input_path,
                dictionary,
                language: cli.language,
                output: cli.output,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args)
        }
    }
}

fn load_config(config_path: &str) -> Result<Config> {
    let config = Config::load_or_default(config_path)?;
    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn list_languages(config_path: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let selector = LanguageSelector::new(config.languages)?;

    for code in selector.options() {
        let marker = if code == selector.default_code() { " (default)" } else { "" };
        println!("{}{}", display_label(code), marker);
    }

    Ok(())
}

fn run_translate(options: TranslateArgs) -> Result<()> {
    // Command line log level wins over the configuration
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options.config_path)?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let mut ui = ConsoleInterface::new(config.default_language().unwrap_or_default(), options.force_overwrite);
    ui.set_dictionary(&options.dictionary);

    let mut controller = Controller::with_config(config, ui)?;
    if let Some(language) = &options.language {
        controller.select_language(language)?;
    }
    let language = controller.selected_language().to_string();
    controller.ui_mut().set_language(&language);

    let session = controller.load_dictionary(Session::new());
    if session.translation_map().is_none() {
        return Err(anyhow!("Could not load dictionary {:?}", options.dictionary));
    }

    if FileManager::dir_exists(&options.input_path) {
        let summary = translate_folder(&mut controller, session, &options.input_path, options.output.as_deref())?;
        if summary.failed > 0 {
            return Err(anyhow!("{} of {} documents failed", summary.failed, summary.total()));
        }
        return Ok(());
    }

    if let Some(output) = options.output {
        let target = if FileManager::dir_exists(&output) {
            OutputTarget::Directory(output)
        } else {
            OutputTarget::File(output)
        };
        controller.ui_mut().set_output(target);
    }

    controller.ui_mut().set_document(&options.input_path);
    let session = controller.load_document(session);

    match controller.translate(&session) {
        TranslateOutcome::Written { .. } | TranslateOutcome::Cancelled => Ok(()),
        TranslateOutcome::Failed(kind) => Err(anyhow!("Translation of {:?} failed ({:?})", options.input_path, kind)),
    }
}
