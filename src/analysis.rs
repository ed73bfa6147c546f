use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::csv_input::{read_column, read_column_from_path, Column};
use crate::error::Result;
use crate::estimate::{compute_summary, is_within_interval, Summary};
use crate::fs;
use crate::plot;
use crate::report::{CliReport, CliVerbosity, MessageFormat};
use crate::{DEFAULT_COLUMN, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_REFERENCE_VALUE};

/// Labels and size of the chart
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfiguration {
    pub(crate) title: String,
    pub(crate) x_desc: String,
    pub(crate) y_desc: String,
    pub(crate) series_label: String,
    pub(crate) size: (u32, u32),
}

impl Default for PlotConfiguration {
    fn default() -> PlotConfiguration {
        PlotConfiguration {
            title: String::from("Daily Study Hours with Confidence Interval"),
            x_desc: String::from("Student Number"),
            y_desc: String::from("Daily Study Hours"),
            series_label: String::from("Study Hours"),
            size: (960, 540),
        }
    }
}

impl PlotConfiguration {
    /// Changes the chart title
    pub fn title<S: Into<String>>(mut self, title: S) -> PlotConfiguration {
        self.title = title.into();
        self
    }

    /// Changes the description of the horizontal axis (observation number)
    pub fn x_desc<S: Into<String>>(mut self, desc: S) -> PlotConfiguration {
        self.x_desc = desc.into();
        self
    }

    /// Changes the description of the vertical axis (observed value)
    pub fn y_desc<S: Into<String>>(mut self, desc: S) -> PlotConfiguration {
        self.y_desc = desc.into();
        self
    }

    /// Changes the legend entry of the observations
    pub fn series_label<S: Into<String>>(mut self, label: S) -> PlotConfiguration {
        self.series_label = label.into();
        self
    }

    /// Changes the size of the chart, in pixels
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn size(mut self, width: u32, height: u32) -> PlotConfiguration {
        assert!(width > 0 && height > 0);

        self.size = (width, height);
        self
    }
}

/// The result of analyzing one column
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The observations that were analyzed
    pub column: Column,
    /// Mean, standard deviation and confidence interval
    pub summary: Summary,
    /// The value compared against the interval
    pub reference_value: f64,
    /// Whether `reference_value` lies inside the interval
    pub within_interval: bool,
    /// Where the chart was written, if it was
    pub chart: Option<PathBuf>,
}

/// The analysis manager
///
/// Reads one column of CSV data, computes its confidence interval, draws the chart and prints the
/// report.
///
/// ```no_run
/// use confint::Analysis;
///
/// let outcome = Analysis::default()
///     .input("study_hours.csv")
///     .confidence_level(0.95)
///     .without_plots()
///     .run()
///     .unwrap();
///
/// println!("{:?}", outcome.summary.confidence_interval);
/// ```
#[derive(Debug, Clone)]
pub struct Analysis {
    input: Option<PathBuf>,
    column: String,
    confidence_level: f64,
    reference_value: f64,
    reference_label: String,
    unit: String,
    output_directory: PathBuf,
    plotting_enabled: bool,
    plot_config: PlotConfiguration,
    report: CliReport,
}

impl Default for Analysis {
    /// Creates an analysis with the default configuration
    ///
    /// - Column: `study_hours`
    /// - Confidence level: 0.90
    /// - Reference value: 2.0 hours
    /// - Output directory: `target/confint`
    /// - Plotting: enabled
    /// - Input: stdin
    fn default() -> Analysis {
        Analysis {
            input: None,
            column: String::from(DEFAULT_COLUMN),
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            reference_value: DEFAULT_REFERENCE_VALUE,
            reference_label: String::from("recommended study time"),
            unit: String::from("hours"),
            output_directory: PathBuf::from("target/confint"),
            plotting_enabled: true,
            plot_config: PlotConfiguration::default(),
            report: CliReport::default(),
        }
    }
}

impl Analysis {
    /// Changes the CSV file to read. `-` reads stdin, as does leaving the input unset.
    pub fn input<P: Into<PathBuf>>(mut self, path: P) -> Analysis {
        self.input = Some(path.into());
        self
    }

    /// Changes the name of the column to analyze
    pub fn column<S: Into<String>>(mut self, column: S) -> Analysis {
        self.column = column.into();
        self
    }

    /// Changes the confidence level of the interval
    ///
    /// # Panics
    ///
    /// Panics if the confidence level is not in the open `(0, 1)` range.
    pub fn confidence_level(mut self, cl: f64) -> Analysis {
        assert!(cl > 0.0 && cl < 1.0);

        self.confidence_level = cl;
        self
    }

    /// Changes the value compared against the interval
    ///
    /// # Panics
    ///
    /// Panics if the value is not finite.
    pub fn reference_value(mut self, value: f64) -> Analysis {
        assert!(value.is_finite());

        self.reference_value = value;
        self
    }

    /// Changes how the reference value is named in the report
    pub fn reference_label<S: Into<String>>(mut self, label: S) -> Analysis {
        self.reference_label = label.into();
        self
    }

    /// Changes the unit shown after the figures. An empty unit shows bare numbers.
    pub fn unit<S: Into<String>>(mut self, unit: S) -> Analysis {
        self.unit = unit.into();
        self
    }

    /// Changes the directory the chart is written to
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Analysis {
        self.output_directory = path.as_ref().to_owned();
        self
    }

    /// Enables the chart
    pub fn with_plots(mut self) -> Analysis {
        self.plotting_enabled = true;
        self
    }

    /// Disables the chart
    pub fn without_plots(mut self) -> Analysis {
        self.plotting_enabled = false;
        self
    }

    /// Changes the labels and size of the chart
    pub fn plot_config(mut self, config: PlotConfiguration) -> Analysis {
        self.plot_config = config;
        self
    }

    /// Changes how the report is printed
    pub fn with_report(mut self, report: CliReport) -> Analysis {
        self.report = report;
        self
    }

    /// Configures the analysis from the process' command-line arguments
    ///
    /// Exits the process with a usage message if the arguments are invalid.
    #[must_use]
    pub fn configure_from_args(self) -> Analysis {
        self.configure_from(std::env::args_os())
    }

    /// Configures the analysis from an explicit argument list; the first item is the program name
    ///
    /// Exits the process with a usage message if the arguments are invalid.
    #[must_use]
    pub fn configure_from<I, T>(mut self, args: I) -> Analysis
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        use clap::{App, Arg};

        let matches = App::new("confint")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Student's t confidence interval for the mean of one CSV column")
            .arg(Arg::with_name("INPUT")
                .help("CSV file with a header row, or - for stdin.")
                .required(true)
                .index(1))
            .arg(Arg::with_name("column")
                .long("column")
                .takes_value(true)
                .default_value(DEFAULT_COLUMN)
                .help("Name of the column to analyze. Missing and non-numeric cells are skipped."))
            .arg(Arg::with_name("confidence-level")
                .long("confidence-level")
                .takes_value(true)
                .validator(validate_confidence_level)
                .help(&format!(
                    "Confidence level of the interval, strictly between 0 and 1. [default: {}]",
                    self.confidence_level
                )))
            .arg(Arg::with_name("reference")
                .long("reference")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(validate_reference)
                .help(&format!(
                    "Value compared against the interval. [default: {}]",
                    self.reference_value
                )))
            .arg(Arg::with_name("reference-label")
                .long("reference-label")
                .takes_value(true)
                .help("How the reference value is named in the report."))
            .arg(Arg::with_name("unit")
                .long("unit")
                .takes_value(true)
                .help("Unit shown after the figures."))
            .arg(Arg::with_name("output-dir")
                .long("output-dir")
                .takes_value(true)
                .help("Directory the chart is written to. [default: target/confint]"))
            .arg(Arg::with_name("noplot")
                .short("n")
                .long("noplot")
                .help("Disable the chart."))
            .arg(Arg::with_name("color")
                .short("c")
                .long("color")
                .alias("colour")
                .takes_value(true)
                .possible_values(&["auto", "always", "never"])
                .default_value("auto")
                .help("Configure coloring of output. always = always colorize output, never = never colorize output, auto = colorize output if output is a tty."))
            .arg(Arg::with_name("message-format")
                .long("message-format")
                .takes_value(true)
                .possible_values(&["text", "json"])
                .default_value("text")
                .help("Print a human-readable report or a single JSON object."))
            .arg(Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Print additional statistical information."))
            .arg(Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .conflicts_with("verbose")
                .help("Print only the verdict."))
            .after_help("
Set the CONFINT_DEBUG environment variable to print diagnostics to stderr.
")
            .get_matches_from(args);

        if let Some(input) = matches.value_of_os("INPUT") {
            self = self.input(input);
        }

        if let Some(column) = matches.value_of("column") {
            self = self.column(column);
        }

        if matches.is_present("confidence-level") {
            let cl = clap::value_t!(matches.value_of("confidence-level"), f64)
                .unwrap_or_else(|e| e.exit());
            self = self.confidence_level(cl);
        }

        if matches.is_present("reference") {
            let reference = clap::value_t!(matches.value_of("reference"), f64)
                .unwrap_or_else(|e| e.exit());
            self = self.reference_value(reference);
        }

        if let Some(label) = matches.value_of("reference-label") {
            self = self.reference_label(label);
        }

        if let Some(unit) = matches.value_of("unit") {
            self = self.unit(unit);
        }

        if let Some(dir) = matches.value_of_os("output-dir") {
            self = self.output_directory(dir);
        }

        if matches.is_present("noplot") {
            self = self.without_plots();
        }

        let stdout_isatty = atty::is(atty::Stream::Stdout);
        let enable_text_coloring = match matches.value_of("color") {
            Some("always") => true,
            Some("never") => false,
            _ => stdout_isatty,
        };

        let verbosity = if matches.is_present("verbose") {
            CliVerbosity::Verbose
        } else if matches.is_present("quiet") {
            CliVerbosity::Quiet
        } else {
            CliVerbosity::Normal
        };

        let message_format = match matches.value_of("message-format") {
            Some("json") => MessageFormat::Json,
            _ => MessageFormat::Text,
        };

        self.report = CliReport::new(enable_text_coloring, verbosity, message_format);
        self
    }

    /// Reads the input, analyzes the configured column and prints the report
    ///
    /// # Errors
    ///
    /// Any error reading the input or computing the interval. A chart that cannot be drawn is
    /// logged and does not fail the run.
    pub fn run(&self) -> Result<Outcome> {
        let column = match self.input.as_deref() {
            Some(path) if path != Path::new("-") => read_column_from_path(path, &self.column)?,
            _ => {
                let stdin = io::stdin();
                let lock = stdin.lock();
                read_column(lock, &self.column)?
            }
        };

        let outcome = self.analyze(column)?;
        self.report
            .print(&outcome, &self.reference_label, &self.unit)?;

        Ok(outcome)
    }

    /// Computes the interval of an already extracted column and draws the chart if enabled
    ///
    /// # Errors
    ///
    /// See [`compute_summary`].
    pub fn analyze(&self, column: Column) -> Result<Outcome> {
        info!(
            "Analyzing '{}': {} observations, {} rows discarded",
            column.name,
            column.values.len(),
            column.discarded()
        );

        let summary = compute_summary(&column.values, self.confidence_level)?;
        let within_interval = is_within_interval(&summary, self.reference_value);
        let chart = if self.plotting_enabled {
            self.draw_chart(&column, &summary)
        } else {
            None
        };

        Ok(Outcome {
            column,
            summary,
            reference_value: self.reference_value,
            within_interval,
            chart,
        })
    }

    fn draw_chart(&self, column: &Column, summary: &Summary) -> Option<PathBuf> {
        let path = self
            .output_directory
            .join(format!("{}.svg", fs::make_filename_safe(&column.name)));

        try_else_return!(fs::mkdirp(&self.output_directory), || None);
        try_else_return!(
            plot::summary_figure(&path, &self.plot_config, column, summary, &self.unit),
            || None
        );

        Some(path)
    }
}

fn validate_confidence_level(s: String) -> ::std::result::Result<(), String> {
    match s.parse::<f64>() {
        Ok(cl) if cl > 0.0 && cl < 1.0 => Ok(()),
        Ok(cl) => Err(format!("{} is not strictly between 0 and 1", cl)),
        Err(e) => Err(e.to_string()),
    }
}

fn validate_reference(s: String) -> ::std::result::Result<(), String> {
    match s.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(()),
        Ok(value) => Err(format!("{} is not a finite number", value)),
        Err(e) => Err(e.to_string()),
    }
}
