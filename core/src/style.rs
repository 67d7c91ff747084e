use std::collections::BTreeMap;

use colored::{Color, ColoredString, Colorize};

use crate::testing::{JudgeCode, TestOutcome};

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for log::Level {
    fn color(&self) -> Color {
        use log::Level::*;
        match self {
            Error => Color::BrightRed,
            Warn => Color::BrightYellow,
            Info => Color::Cyan,
            Debug => Color::Magenta,
            Trace => Color::Blue,
        }
    }
}

impl ColorTheme for JudgeCode {
    fn color(&self) -> Color {
        use JudgeCode::*;
        match self {
            AC => Color::Green,
            WA => Color::Yellow,
            TLE => Color::Red,
            RE => Color::Magenta,
            IE => Color::Blue,
        }
    }
}

/// Fixed-width badge such as ` AC  ` / ` TLE `.
pub fn judge_icon(judge: JudgeCode) -> ColoredString {
    format!(" {:<3} ", judge.to_string())
        .on_color(judge.color())
        .bold()
        .black()
}

/// One status line per test; the plain-text part is the `Display` of the outcome.
pub fn print_test_outcome(res: &TestOutcome) {
    let line = res.to_string();
    let line = if res.is_passed() {
        line.normal()
    } else {
        line.bright_red()
    };
    match res.execution_time {
        Some(t) => println!(
            "{} {} {}",
            judge_icon(res.judge()),
            line,
            format!("[{}ms]", t.as_millis()).dimmed()
        ),
        None => println!("{} {}", judge_icon(res.judge()), line),
    }
}

pub fn print_test_result_summary(results: &[TestOutcome]) {
    let bar = "-".repeat(5);
    print!("{} ", bar);

    let count: BTreeMap<JudgeCode, usize> =
        results.iter().fold(BTreeMap::new(), |mut count, r| {
            *count.entry(r.judge()).or_default() += 1;
            count
        });

    let num_total_test = results.len();
    let num_passed = *count.get(&JudgeCode::AC).unwrap_or(&0);
    let num_failed = num_total_test - num_passed;

    if num_passed == num_total_test {
        let msg = format!("All {} tests passed", num_total_test);
        print!("{}", msg.green());
    } else {
        let summary_msg = if num_passed > 0 {
            format!("{}/{} tests failed", num_failed, num_total_test)
        } else {
            format!("All {} tests failed", num_total_test)
        };

        let detail_msg = count
            .iter()
            .filter(|(&judge, _)| judge != JudgeCode::AC)
            .map(|(&judge, &cnt)| {
                format!(
                    "{}{}{}",
                    self::judge_icon(judge),
                    "x".dimmed(),
                    cnt.to_string().bold().bright_white(),
                )
            })
            .collect::<Vec<String>>()
            .join(", ");

        print!("{} ({})", summary_msg.bright_red(), detail_msg);
    }

    println!(" {}", bar);
}
