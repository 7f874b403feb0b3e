use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use runlog::audit::PreparedRun;

/// Human-readable description of a prepared run
pub struct RunSummary<'a> {
    run: &'a PreparedRun,
}

impl<'a> RunSummary<'a> {
    pub fn new(run: &'a PreparedRun) -> Self {
        Self { run }
    }

    fn expired(&self) -> Vec<&'static str> {
        let params = &self.run.run_parameters;
        params
            .consumables()
            .into_iter()
            .filter(|(_, c)| c.expiration_date < params.run_start_date)
            .map(|(label, _)| label)
            .collect()
    }

    /// Format the summary with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();

            output.push_str(&format!("{}\n", style("Sequencing Run Audit").bold().cyan()));
            output.push_str(&format!("{}\n", style("====================").cyan()));

            for (column, value) in self.run.record.pairs() {
                output.push_str(&format!("{}: {}\n", style(format!("{:>20}", column)).bold(), value));
            }

            let expired = self.expired();
            output.push('\n');
            if expired.is_empty() {
                output.push_str(&format!("{}\n", style("All consumables in date").green()));
            } else {
                output.push_str(&format!(
                    "{}: {}\n",
                    style("Expired at run start").yellow().bold(),
                    expired.join(", ")
                ));
            }

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for RunSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sequencing Run Audit")?;
        writeln!(f, "====================")?;
        for (column, value) in self.run.record.pairs() {
            writeln!(f, "{:>20}: {}", column, value)?;
        }
        writeln!(f)?;

        let expired = self.expired();
        if expired.is_empty() {
            writeln!(f, "All consumables in date")
        } else {
            writeln!(f, "Expired at run start: {}", expired.join(", "))
        }
    }
}
