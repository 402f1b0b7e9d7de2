use std::io::{self, BufRead, Write};

use chrono::{DateTime, Utc};
use tracing::{error, info};
use tracing_indicatif::suspend_tracing_indicatif;

use crate::application::pipeline::{ExportPipeline, PreparedExport};
use crate::domain::Table;
use crate::ports::drive_uploader::DriveUploader;
use crate::ports::spreadsheet_reader::SpreadsheetReader;

const URL_PROMPT: &str = "🔗 Spreadsheet URL to process (empty line to quit): ";
const NAME_PROMPT: &str = "📝 Name for the generated file (empty line to start over): ";

/// Interactive front end: asks for a URL, previews the kept columns, asks
/// for a name and exports. Failures are shown and the loop starts over.
pub struct ConsoleAdapter<'a, R: ?Sized, U: ?Sized, I, O> {
    pipeline: ExportPipeline<'a, R, U>,
    input: I,
    output: O,
    clock: fn() -> DateTime<Utc>,
}

impl<'a, R: ?Sized, U: ?Sized, I, O> std::fmt::Debug for ConsoleAdapter<'a, R, U, I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleAdapter")
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

impl<'a, R, U, I, O> ConsoleAdapter<'a, R, U, I, O>
where
    R: SpreadsheetReader + ?Sized,
    U: DriveUploader + ?Sized,
    I: BufRead,
    O: Write,
{
    pub fn new(pipeline: ExportPipeline<'a, R, U>, input: I, output: O) -> Self {
        Self {
            pipeline,
            input,
            output,
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Runs until the operator enters an empty URL or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            let url = match self.prompt(URL_PROMPT)? {
                Some(url) if !url.is_empty() => url,
                _ => break,
            };

            if !self.run_once(&url).await? {
                break;
            }
        }

        info!("Console session ended");
        Ok(())
    }

    /// Handles one URL. Returns `false` when input ended mid-way.
    async fn run_once(&mut self, url: &str) -> io::Result<bool> {
        self.show("📥 Loading the spreadsheet...\n")?;

        let prepared = match self.pipeline.prepare(url).await {
            Ok(prepared) => prepared,
            Err(report) => {
                error!("❌ prepare: {:?}", report);
                self.show(&format!("❌ {}\n", report.current_context()))?;
                return Ok(true);
            }
        };
        self.show_prepared(&prepared)?;

        let display_name = match self.prompt(NAME_PROMPT)? {
            Some(name) => name,
            None => return Ok(false),
        };
        if display_name.is_empty() {
            return Ok(true);
        }

        let name = self.pipeline.output_name(&display_name, (self.clock)());
        self.show(&format!("📝 Final file name: {}\n", name))?;

        match self.pipeline.export(&prepared, &name).await {
            Ok(exported) => self.show(&format!(
                "✅ New file '{}' created: {}\n📁 Saved in Google Drive folder ID: {}\n",
                exported.name, exported.url, exported.folder_id
            ))?,
            Err(report) => {
                error!("❌ export: {:?}", report);
                self.show(&format!("❌ {}\n", report.current_context()))?;
            }
        }
        Ok(true)
    }

    fn show_prepared(&mut self, prepared: &PreparedExport) -> io::Result<()> {
        let mut text = String::new();
        for notice in &prepared.notices {
            text.push_str(&format!("⚠️  {}\n", notice));
        }
        text.push_str(&format!("🔍 Kept columns: {:?}\n", prepared.resolved_columns));

        let preview = prepared.table.head(self.pipeline.config().preview_rows);
        if preview.column_count() > 0 {
            text.push_str(&render_grid(&preview));
        }
        self.show(&text)
    }

    /// Writes `text` with progress bars hidden so they cannot draw over it.
    fn show(&mut self, text: &str) -> io::Result<()> {
        let output = &mut self.output;
        suspend_tracing_indicatif(|| {
            output.write_all(text.as_bytes())?;
            output.flush()
        })
    }

    /// Prints `message` and reads one trimmed line. `None` at end of input.
    ///
    /// Progress bars stay hidden until the operator has answered.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        let Self { input, output, .. } = self;
        suspend_tracing_indicatif(|| {
            output.write_all(message.as_bytes())?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                output.write_all(b"\n")?;
                output.flush()?;
                return Ok(None);
            }
            Ok(Some(line.trim().to_string()))
        })
    }
}

/// Renders a table as left-aligned text columns separated by ` | `.
pub fn render_grid(table: &Table) -> String {
    let mut widths: Vec<usize> = table
        .headers()
        .iter()
        .map(|header| header.chars().count())
        .collect();
    for row in table.rows() {
        for (width, value) in widths.iter_mut().zip(row.values()) {
            *width = (*width).max(value.chars().count());
        }
    }

    let format_line = |cells: &[String]| -> String {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| {
                let cell = cell.replace('\n', " ");
                let padding = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(padding))
            })
            .collect::<Vec<_>>()
            .join(" | ");
        format!("{}\n", line.trim_end())
    };

    let mut grid = format_line(table.headers());
    let separator = widths
        .iter()
        .map(|&width| "-".repeat(width))
        .collect::<Vec<_>>()
        .join("-+-");
    grid.push_str(&separator);
    grid.push('\n');
    for row in table.rows() {
        grid.push_str(&format_line(row.values()));
    }
    grid
}
