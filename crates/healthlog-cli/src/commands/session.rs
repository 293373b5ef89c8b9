//! Interactive logging session.
//!
//! Reads one command per line from stdin and ticks the reminder from the
//! same single-threaded loop. Records exist only for the lifetime of the
//! process.

use std::time::Duration;

use clap::Args;
use healthlog_core::{
    Config, Controller, Event, Projection, View, PROFILE_FORM, RECORD_FORM,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

/// Upper bound on how often the reminder is polled.
const MAX_TICK_MS: u64 = 1000;

const HELP: &str = "\
Commands:
  set <field> <value>   edit a field of the current form (empty value clears it)
  form                  show the current form and draft values (alias: draft)
  submit                submit the current form
  dashboard             show the weight trend and meal log
  help                  show this help
  quit                  end the session";

#[derive(Args)]
pub struct SessionArgs {
    /// Override the reminder period in milliseconds
    #[arg(long)]
    reminder_period_ms: Option<u64>,
    /// Turn the periodic reminder off for this session
    #[arg(long)]
    no_reminder: bool,
    /// Print events as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

enum Flow {
    Continue,
    Quit,
}

pub fn run(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    if let Some(period_ms) = args.reminder_period_ms {
        config.reminder.period_ms = period_ms.max(1);
    }
    if args.no_reminder {
        config.reminder.enabled = false;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let controller = Controller::new(&config);
    // The scheduler's period is already floored at 1 ms; the ticker must follow it.
    let period_ms = controller.reminders().period_ms();
    let result = runtime.block_on(run_loop(controller, period_ms, args.json));
    // A stdin read may still be parked on the blocking pool.
    runtime.shutdown_background();
    result
}

async fn run_loop(
    mut controller: Controller,
    period_ms: u64,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let out = Output { json };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_millis(period_ms.min(MAX_TICK_MS)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    out.banner(&controller);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if let Flow::Quit = handle_line(&mut controller, &line, &out)? {
                    break;
                }
            }
            _ = ticker.tick() => {
                if let Some(event) = controller.tick() {
                    out.event(&event)?;
                }
            }
        }
    }

    // Dashboard teardown: nothing may fire after this.
    if let Some(event) = controller.close() {
        out.event(&event)?;
    }
    Ok(())
}

fn handle_line(
    controller: &mut Controller,
    line: &str,
    out: &Output,
) -> Result<Flow, Box<dyn std::error::Error>> {
    let line = line.trim();
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

    match command {
        "" => {}
        "help" => out.text(HELP),
        "quit" | "exit" => return Ok(Flow::Quit),
        "form" | "draft" => out.form(controller)?,
        "set" => {
            let rest = rest.trim_start();
            let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
            if let Err(e) = controller.set_field(field, value.trim()) {
                out.error(&e);
            }
        }
        "submit" => match controller.submit() {
            Ok(events) => {
                for event in &events {
                    out.event(event)?;
                }
                if controller.view() == View::Dashboard && !out.json {
                    out.dashboard(&controller.dashboard()?);
                }
            }
            Err(e) => out.error(&e),
        },
        "dashboard" => match controller.snapshot() {
            Ok(snapshot) if out.json => out.event(&snapshot)?,
            Ok(_) => out.dashboard(&controller.dashboard()?),
            Err(e) => out.error(&e),
        },
        other => out.error(&format!("unknown command '{other}', try 'help'")),
    }
    Ok(Flow::Continue)
}

struct Output {
    json: bool,
}

impl Output {
    fn banner(&self, controller: &Controller) {
        if self.json {
            return;
        }
        println!("healthlog session. Type 'help' for commands.");
        if controller.view() == View::ProfileForm {
            println!("Fill in your profile with 'set <field> <value>', then 'submit'.");
        }
    }

    fn text(&self, text: &str) {
        if !self.json {
            println!("{text}");
        }
    }

    fn error(&self, err: &dyn std::fmt::Display) {
        if self.json {
            println!("{}", serde_json::json!({ "type": "Error", "message": err.to_string() }));
        } else {
            println!("error: {err}");
        }
    }

    fn event(&self, event: &Event) -> Result<(), serde_json::Error> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
            return Ok(());
        }
        match event {
            Event::ProfileSaved { welcome, .. } => println!("{welcome}"),
            Event::RecordAdded { total, .. } => println!("Record added ({total} total)."),
            Event::RecordRejected { notice, .. } => println!("! {notice}"),
            Event::ReminderArmed { period_ms, .. } => {
                tracing::debug!(period_ms, "reminder armed for session");
            }
            Event::ReminderFired { message, .. } => println!("[reminder] {message}"),
            Event::ReminderDisarmed { .. } => {}
            Event::DashboardSnapshot { projection, .. } => self.dashboard(projection),
        }
        Ok(())
    }

    fn form(&self, controller: &Controller) -> Result<(), serde_json::Error> {
        let rows: Vec<(&str, &str, &str)> = match controller.view() {
            View::ProfileForm => PROFILE_FORM
                .iter()
                .map(|spec| (spec.field.key(), spec.label, controller.profile_draft().get(spec.field)))
                .collect(),
            View::Dashboard => RECORD_FORM
                .iter()
                .map(|spec| (spec.field.key(), spec.label, controller.record_draft().get(spec.field)))
                .collect(),
        };

        if self.json {
            let draft: serde_json::Map<String, serde_json::Value> = rows
                .iter()
                .map(|(key, _, value)| (key.to_string(), serde_json::Value::from(*value)))
                .collect();
            println!(
                "{}",
                serde_json::to_string(&serde_json::json!({
                    "type": "Form",
                    "view": controller.view(),
                    "draft": draft,
                }))?
            );
            return Ok(());
        }
        for (key, label, value) in rows {
            println!("  {key:<16} {label:<24} {value}");
        }
        Ok(())
    }

    fn dashboard(&self, projection: &Projection) {
        println!("Weight trend:");
        if projection.series.is_empty() {
            println!("  (no records)");
        }
        for point in &projection.series {
            match point.y {
                Some(y) => println!("  {:<12} {y}", point.x),
                None => println!("  {:<12} -", point.x),
            }
        }
        println!("Meal log:");
        for entry in &projection.log {
            println!("  - {} - {}", entry.date, entry.meals);
        }
    }
}
