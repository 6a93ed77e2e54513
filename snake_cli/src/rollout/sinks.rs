// snake_cli/src/rollout/sinks.rs
#![forbid(unsafe_code)]

/// One periodic row emitted by the runner.
///
/// Transport struct: runner/stats compute fields, sinks only format/emit.
#[derive(Clone, Debug)]
pub struct ReportRow {
    pub session: u64,
    pub sessions_total: u64,

    /// Ticks per second of wall time.
    pub tps: f64,
    pub ticks: u64,

    pub avg_score: f64,
    pub best_score: u64,
    pub avg_items: f64,
    pub avg_len: f64,
    pub avg_ticks: f64,

    pub coins: u64,

    /// End-reason counts so far.
    pub hit_wall: u64,
    pub hit_self: u64,
    pub board_full: u64,
    pub stopped: u64,
}

/// Sink interface for periodic reporting.
pub trait RolloutSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&indicatif::ProgressBar>);
}

#[derive(Default)]
pub struct NoopSink;

impl RolloutSink for NoopSink {
    fn on_report_row(&mut self, _row: &ReportRow, _pb: Option<&indicatif::ProgressBar>) {}
}

/// Human-readable periodic table sink.
///
/// Cadence (every N sessions) is handled by Runner. This sink prints whenever called.
pub struct TableSink {
    header_every: u64,
    rows_printed: u64,
}

impl TableSink {
    const DEFAULT_HEADER_EVERY: u64 = 20;

    /// If `header_every == 0`, a reasonable default is used.
    pub fn new(header_every: u64) -> Self {
        Self {
            header_every: if header_every == 0 {
                Self::DEFAULT_HEADER_EVERY
            } else {
                header_every
            },
            rows_printed: 0,
        }
    }

    fn header_line(&self) -> String {
        // keep widths aligned with row_line()
        format!(
            "{:>17} {:>10} {:>11} {:>9} {:>7} {:>8} {:>8} {:>9} {:>8} {:>6} {:>6} {:>6} {:>6}",
            "session/total",
            "tps",
            "ticks",
            "avgScore",
            "best",
            "avgItem",
            "avgLen",
            "avgTicks",
            "coins",
            "wall",
            "self",
            "full",
            "stop",
        )
    }

    fn sep_line(&self) -> String {
        "-".repeat(self.header_line().len())
    }

    fn row_line(&self, r: &ReportRow) -> String {
        format!(
            "{:>8}/{:<8} {:>10.1} {:>11} {:>9.2} {:>7} {:>8.2} {:>8.2} {:>9.1} {:>8} {:>6} {:>6} {:>6} {:>6}",
            r.session,
            r.sessions_total,
            r.tps,
            r.ticks,
            r.avg_score,
            r.best_score,
            r.avg_items,
            r.avg_len,
            r.avg_ticks,
            r.coins,
            r.hit_wall,
            r.hit_self,
            r.board_full,
            r.stopped,
        )
    }
}

impl RolloutSink for TableSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&indicatif::ProgressBar>) {
        let mut lines: Vec<String> = Vec::new();

        if self.rows_printed % self.header_every == 0 {
            lines.push(self.header_line());
            lines.push(self.sep_line());
        }

        lines.push(self.row_line(row));
        self.rows_printed += 1;

        if let Some(pb) = pb {
            for l in lines {
                pb.println(l);
            }
        } else {
            for l in lines {
                println!("{l}");
            }
        }
    }
}
