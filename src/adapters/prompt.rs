use crate::domain::model::EventParameters;
use crate::utils::error::{PhaseListError, Result};
use std::io::{BufRead, Write};

pub const FALLBACK_NOTICE: &str =
    "Either no command line options were entered, or one of them was incorrect.";

/// Line-oriented prompter; stdin/stdout in the binary, in-memory buffers in tests.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ask(&mut self, prompt: &str, field: &str) -> Result<String> {
        write!(self.writer, "{} ", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(PhaseListError::InputClosed {
                field: field.to_string(),
            });
        }
        Ok(line.trim().to_string())
    }

    /// 數值輸入錯誤時重新詢問
    fn ask_number(&mut self, prompt: &str, field: &str) -> Result<f64> {
        loop {
            let answer = self.ask(prompt, field)?;
            match answer.parse::<f64>() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    tracing::debug!("Rejected {} input '{}'", field, answer);
                    writeln!(self.writer, "'{}' is not a number, try again.", answer)?;
                }
            }
        }
    }

    /// Prints the fallback notice and asks for all six values.
    pub fn prompt_parameters(&mut self) -> Result<EventParameters> {
        writeln!(self.writer, "{}", FALLBACK_NOTICE)?;

        let origin_time = self.ask(
            "Enter origin time in format yyyy-mm-ddTHH:MM:SS >",
            "origin time",
        )?;
        let station_latitude = self.ask_number("Enter the station latitude. >", "station latitude")?;
        let station_longitude =
            self.ask_number("Enter the station longitude. >", "station longitude")?;
        let event_latitude = self.ask_number("Enter the event latitude. >", "event latitude")?;
        let event_longitude = self.ask_number("Enter the event longitude. >", "event longitude")?;
        let depth_km = self.ask_number("Enter the event depth. >", "event depth")?;

        Ok(EventParameters {
            origin_time,
            station_latitude,
            station_longitude,
            event_latitude,
            event_longitude,
            depth_km,
        })
    }
}

impl Prompter<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}
