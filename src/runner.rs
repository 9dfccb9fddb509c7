//! Row-based case runner.
//!
//! A `Suite` holds named cases, each optionally parameterized by rows of
//! literal values. `run` executes every row independently and records one
//! outcome per invocation. Lifecycle hooks mirror the usual xUnit shape:
//! `before_all`/`after_all` run once per suite, `before_each`/`after_each`
//! run around every invocation, and `after_each` runs even when the case
//! body panics (the body is isolated with `catch_unwind`).
//!
//! The runner has no output of its own; the resulting [`SuiteReport`] is
//! plain data for the caller to assert on or render.

use core::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// A literal parameter value in a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Text(String),
    Flag(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Text(v) => write!(f, "{v:?}"),
            Literal::Flag(v) => write!(f, "{v}"),
        }
    }
}

/// One tuple of parameters for a case invocation.
pub type Row = Vec<Literal>;

/// What a case body concluded for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(String),
    /// The row does not apply (the assumption/abort case); the invocation is
    /// reported skipped, not failed.
    Skip(String),
}

/// Reported outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed(String),
    Skipped(String),
}

/// Outcome of a single case/row invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub case: String,
    pub row: usize,
    pub rendered_row: String,
    pub outcome: Outcome,
}

type Body = Box<dyn Fn(&Row) -> Verdict>;
type SuiteHook = Box<dyn FnMut()>;
type CaseHook = Box<dyn FnMut(&str)>;

struct Case {
    name: String,
    rows: Vec<Row>,
    body: Body,
}

/// A named collection of cases plus lifecycle hooks.
pub struct Suite {
    name: String,
    cases: Vec<Case>,
    before_all: Option<SuiteHook>,
    after_all: Option<SuiteHook>,
    before_each: Option<CaseHook>,
    after_each: Option<CaseHook>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
            before_all: None,
            after_all: None,
            before_each: None,
            after_each: None,
        }
    }

    pub fn before_all(&mut self, hook: impl FnMut() + 'static) -> &mut Self {
        self.before_all = Some(Box::new(hook));
        self
    }

    pub fn after_all(&mut self, hook: impl FnMut() + 'static) -> &mut Self {
        self.after_all = Some(Box::new(hook));
        self
    }

    pub fn before_each(&mut self, hook: impl FnMut(&str) + 'static) -> &mut Self {
        self.before_each = Some(Box::new(hook));
        self
    }

    pub fn after_each(&mut self, hook: impl FnMut(&str) + 'static) -> &mut Self {
        self.after_each = Some(Box::new(hook));
        self
    }

    /// Add an unparameterized case: one invocation with an empty row.
    pub fn case(
        &mut self,
        name: impl Into<String>,
        body: impl Fn(&Row) -> Verdict + 'static,
    ) -> &mut Self {
        self.case_with_rows(name, vec![Vec::new()], body)
    }

    /// Add a parameterized case: one independent invocation per row.
    pub fn case_with_rows(
        &mut self,
        name: impl Into<String>,
        rows: Vec<Row>,
        body: impl Fn(&Row) -> Verdict + 'static,
    ) -> &mut Self {
        self.cases.push(Case {
            name: name.into(),
            rows,
            body: Box::new(body),
        });
        self
    }

    /// Execute every case row and collect per-invocation outcomes.
    pub fn run(mut self) -> SuiteReport {
        if let Some(hook) = self.before_all.as_mut() {
            hook();
        }

        let mut results = Vec::new();
        for case in &self.cases {
            for (row_idx, row) in case.rows.iter().enumerate() {
                if let Some(hook) = self.before_each.as_mut() {
                    hook(&case.name);
                }

                let verdict = catch_unwind(AssertUnwindSafe(|| (case.body)(row)));

                // after_each is guaranteed, including on panic.
                if let Some(hook) = self.after_each.as_mut() {
                    hook(&case.name);
                }

                let outcome = match verdict {
                    Ok(Verdict::Pass) => Outcome::Passed,
                    Ok(Verdict::Fail(msg)) => Outcome::Failed(msg),
                    Ok(Verdict::Skip(reason)) => Outcome::Skipped(reason),
                    Err(payload) => Outcome::Failed(panic_message(payload.as_ref())),
                };
                results.push(CaseResult {
                    case: case.name.clone(),
                    row: row_idx,
                    rendered_row: render_row(row),
                    outcome,
                });
            }
        }

        if let Some(hook) = self.after_all.as_mut() {
            hook();
        }

        SuiteReport {
            suite: self.name,
            results,
        }
    }
}

fn render_row(row: &Row) -> String {
    let cells: Vec<String> = row.iter().map(Literal::to_string).collect();
    format!("[{}]", cells.join(", "))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "case body panicked".to_string()
    }
}

/// Per-invocation outcomes for one suite run.
#[derive(Debug)]
pub struct SuiteReport {
    suite: String,
    results: Vec<CaseResult>,
}

impl SuiteReport {
    pub fn suite(&self) -> &str {
        &self.suite
    }

    pub fn results(&self) -> &[CaseResult] {
        &self.results
    }

    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    /// True when no invocation failed (skips do not fail a run).
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} passed, {} failed, {} skipped",
            self.suite,
            self.passed(),
            self.failed(),
            self.skipped()
        )?;
        for r in &self.results {
            let (tag, detail) = match &r.outcome {
                Outcome::Passed => ("PASSED", String::new()),
                Outcome::Failed(msg) => ("FAILED", format!(": {msg}")),
                Outcome::Skipped(reason) => ("SKIPPED", format!(": {reason}")),
            };
            writeln!(f, "  {} {} {}{}", tag, r.case, r.rendered_row, detail)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn log() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) + Clone) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let events = events.clone();
            move |e: &str| events.borrow_mut().push(e.to_string())
        };
        (events, sink)
    }

    /// Invariant: suite hooks run once, per-invocation hooks run around each
    /// row, in declaration order of the cases.
    #[test]
    fn lifecycle_ordering() {
        let (events, sink) = log();

        let mut suite = Suite::new("lifecycle");
        {
            let s = sink.clone();
            suite.before_all(move || s("before_all"));
        }
        {
            let s = sink.clone();
            suite.after_all(move || s("after_all"));
        }
        {
            let s = sink.clone();
            suite.before_each(move |c| s(&format!("before_each {c}")));
        }
        {
            let s = sink.clone();
            suite.after_each(move |c| s(&format!("after_each {c}")));
        }
        {
            let s = sink.clone();
            suite.case("one", move |_| {
                s("body one");
                Verdict::Pass
            });
        }
        {
            let s = sink.clone();
            suite.case("two", move |_| {
                s("body two");
                Verdict::Pass
            });
        }

        let report = suite.run();
        assert!(report.is_success());
        assert_eq!(
            events.borrow().as_slice(),
            [
                "before_all",
                "before_each one",
                "body one",
                "after_each one",
                "before_each two",
                "body two",
                "after_each two",
                "after_all",
            ]
        );
    }

    /// Invariant: `after_each` runs even when the body panics, and the panic
    /// is reported as a failure carrying its message.
    #[test]
    fn after_each_runs_on_panic() {
        let (events, sink) = log();

        let mut suite = Suite::new("panics");
        {
            let s = sink.clone();
            suite.after_each(move |c| s(&format!("after_each {c}")));
        }
        suite.case("boom", |_| panic!("exploded"));

        let report = suite.run();
        assert_eq!(report.failed(), 1);
        assert_eq!(events.borrow().as_slice(), ["after_each boom"]);
        match &report.results()[0].outcome {
            Outcome::Failed(msg) => assert!(msg.contains("exploded")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    /// Invariant: each row is an independent invocation with its own
    /// outcome; one failing row does not affect its neighbors.
    #[test]
    fn rows_run_independently() {
        let rows = vec![
            vec![Literal::Int(2), Literal::Flag(true)],
            vec![Literal::Int(3), Literal::Flag(false)],
            vec![Literal::Int(4), Literal::Flag(true)],
        ];
        let mut suite = Suite::new("parameterized");
        suite.case_with_rows("even", rows, |row| {
            let (n, expected_even) = match row.as_slice() {
                [Literal::Int(n), Literal::Flag(e)] => (*n, *e),
                _ => return Verdict::Fail("malformed row".to_string()),
            };
            if (n % 2 == 0) == expected_even {
                Verdict::Pass
            } else {
                Verdict::Fail(format!("{n} parity mismatch"))
            }
        });

        let report = suite.run();
        assert_eq!(report.passed(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.results()[1].row, 1);
        assert_eq!(report.results()[1].rendered_row, "[3, false]");
    }

    /// Invariant: a skip verdict is reported as skipped, does not fail the
    /// run, and carries its reason.
    #[test]
    fn skip_is_not_failure() {
        let mut suite = Suite::new("skips");
        suite.case("assumption", |_| Verdict::Skip("not on this platform".to_string()));
        suite.case("real", |_| Verdict::Pass);

        let report = suite.run();
        assert!(report.is_success());
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.passed(), 1);
        assert_eq!(
            report.results()[0].outcome,
            Outcome::Skipped("not on this platform".to_string())
        );
    }

    /// Invariant: an unparameterized case runs exactly once with an empty
    /// rendered row.
    #[test]
    fn unparameterized_case_runs_once() {
        let mut suite = Suite::new("plain");
        suite.case("single", |row| {
            if row.is_empty() {
                Verdict::Pass
            } else {
                Verdict::Fail("expected empty row".to_string())
            }
        });
        let report = suite.run();
        assert_eq!(report.results().len(), 1);
        assert_eq!(report.results()[0].rendered_row, "[]");
        assert!(report.is_success());
    }

    /// Invariant: the report renders one line per invocation with its tag.
    #[test]
    fn report_display() {
        let mut suite = Suite::new("display");
        suite.case("ok", |_| Verdict::Pass);
        suite.case("bad", |_| Verdict::Fail("nope".to_string()));
        let rendered = suite.run().to_string();
        assert!(rendered.contains("display: 1 passed, 1 failed, 0 skipped"));
        assert!(rendered.contains("PASSED ok"));
        assert!(rendered.contains("FAILED bad"));
        assert!(rendered.contains("nope"));
    }
}
