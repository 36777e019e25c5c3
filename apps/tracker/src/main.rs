use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use shared::domain::{JobApplication, JobDraft, JobId, JobStatus, SortKey, StatusFilter};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracker_core::{read_snapshot_file, write_snapshot, CommitOutcome, JobTracker, SubmitOutcome};

mod prompt;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "tracker", about = "Track job applications from the terminal")]
struct Cli {
    /// Overrides the configured sqlite database.
    #[arg(long)]
    database_url: Option<String>,
    /// Answer yes to every confirmation.
    #[arg(long, short = 'y', global = true)]
    yes: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show applications using the saved (or given) filter and sort.
    List {
        #[arg(long)]
        filter: Option<StatusFilter>,
        #[arg(long)]
        sort: Option<String>,
    },
    Add(NewJobArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: EditJobArgs,
    },
    Delete {
        id: i64,
    },
    /// Follow-ups due within the reminder window.
    Reminders,
    /// Count of applications per status.
    Summary,
    Export {
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    Import {
        file: PathBuf,
    },
    /// Delete every application and saved preference.
    Clear,
}

#[derive(Args, Debug)]
struct NewJobArgs {
    company: String,
    position: String,
    #[arg(long, default_value_t = JobStatus::Applied)]
    status: JobStatus,
    /// Defaults to today.
    #[arg(long)]
    applied_date: Option<NaiveDate>,
    #[arg(long)]
    follow_up_date: Option<NaiveDate>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    salary: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long)]
    contact_email: Option<String>,
    #[arg(long)]
    job_url: Option<String>,
}

#[derive(Args, Debug)]
struct EditJobArgs {
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    position: Option<String>,
    #[arg(long)]
    status: Option<JobStatus>,
    #[arg(long)]
    applied_date: Option<NaiveDate>,
    /// Pass an empty string to clear the follow-up date.
    #[arg(long)]
    follow_up_date: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    salary: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long)]
    contact_email: Option<String>,
    #[arg(long)]
    job_url: Option<String>,
}

impl NewJobArgs {
    fn apply(self, draft: &mut JobDraft) {
        draft.company = self.company;
        draft.position = self.position;
        draft.status = self.status;
        if let Some(applied_date) = self.applied_date {
            draft.applied_date = applied_date;
        }
        draft.follow_up_date = self.follow_up_date;
        draft.location = self.location;
        draft.salary = self.salary;
        draft.notes = self.notes;
        draft.contact_email = self.contact_email;
        draft.job_url = self.job_url;
    }
}

impl EditJobArgs {
    fn apply(self, draft: &mut JobDraft) -> Result<()> {
        if let Some(company) = self.company {
            draft.company = company;
        }
        if let Some(position) = self.position {
            draft.position = position;
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        if let Some(applied_date) = self.applied_date {
            draft.applied_date = applied_date;
        }
        if let Some(raw) = self.follow_up_date {
            draft.follow_up_date = match raw.trim() {
                "" => None,
                value => Some(value.parse()?),
            };
        }
        for (slot, value) in [
            (&mut draft.location, self.location),
            (&mut draft.salary, self.salary),
            (&mut draft.notes, self.notes),
            (&mut draft.contact_email, self.contact_email),
            (&mut draft.job_url, self.job_url),
        ] {
            if let Some(value) = value {
                *slot = Some(value);
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = settings::load_settings()?;
    if let Some(database_url) = cli.database_url.as_deref() {
        cfg.database_url = settings::normalize_database_url(database_url);
    }
    info!(database_url = %cfg.database_url, "tracker: opening store");

    let storage = Storage::new(&cfg.database_url).await?;
    storage.health_check().await?;
    let mut tracker = JobTracker::load(Arc::new(storage))
        .await
        .with_reminder_window(cfg.reminder_window_days);

    match cli.command {
        Command::List { filter, sort } => {
            if let Some(filter) = filter {
                tracker.set_filter(filter).await;
            }
            if let Some(sort) = sort {
                tracker.set_sort(SortKey::parse_lenient(&sort)).await;
            }
            print_reminders(&tracker.upcoming_reminders());
            let jobs = tracker.filtered_and_sorted();
            if jobs.is_empty() {
                println!("No job applications found.");
            }
            for job in jobs {
                print_job(job);
            }
        }
        Command::Add(args) => {
            tracker.begin_create();
            args.apply(tracker.draft_mut());
            if let SubmitOutcome::Created(id) = tracker.submit_draft().await {
                println!("created job id={id}");
            }
        }
        Command::Edit { id, fields } => {
            let id = JobId(id);
            if !tracker.begin_edit(id) {
                anyhow::bail!("no job application with id {id}");
            }
            if let Err(err) = fields.apply(tracker.draft_mut()) {
                tracker.cancel_draft();
                return Err(err);
            }
            match tracker.submit_draft().await {
                SubmitOutcome::Updated(id) => println!("updated job id={id}"),
                SubmitOutcome::Missing(id) | SubmitOutcome::Created(id) => {
                    anyhow::bail!("job application {id} was not updated")
                }
            }
        }
        Command::Delete { id } => {
            let id = JobId(id);
            let Some(pending) = tracker.request_delete(id) else {
                anyhow::bail!("no job application with id {id}");
            };
            if let Some(confirmed) = prompt::resolve_intent_on_terminal(pending, cli.yes)? {
                report(tracker.commit(confirmed).await);
            }
        }
        Command::Reminders => {
            let reminders = tracker.upcoming_reminders();
            if reminders.is_empty() {
                println!(
                    "No follow-ups due in the next {} days.",
                    cfg.reminder_window_days
                );
            }
            print_reminders(&reminders);
        }
        Command::Summary => {
            for (status, count) in tracker.status_counts() {
                println!("{:<10} {count}", status.label());
            }
            println!("{:<10} {}", "Total", tracker.jobs().len());
        }
        Command::Export { out_dir } => {
            let snapshot = tracker.export_snapshot()?;
            let dir = out_dir.unwrap_or(cfg.export_dir);
            let path = write_snapshot(&dir, &snapshot).await?;
            println!(
                "exported {} job applications to {}",
                tracker.jobs().len(),
                path.display()
            );
        }
        Command::Import { file } => {
            let blob = read_snapshot_file(&file).await?;
            let pending = tracker.import_snapshot(&blob)?;
            if let Some(confirmed) = prompt::resolve_intent_on_terminal(pending, cli.yes)? {
                report(tracker.commit(confirmed).await);
            }
        }
        Command::Clear => {
            let pending = tracker.request_clear();
            if let Some(confirmed) = prompt::resolve_intent_on_terminal(pending, cli.yes)? {
                report(tracker.commit(confirmed).await);
            }
        }
    }

    Ok(())
}

fn report(outcome: CommitOutcome) {
    match outcome {
        CommitOutcome::Deleted(id) => println!("deleted job id={id}"),
        CommitOutcome::NotFound(id) => println!("job id={id} was already gone"),
        CommitOutcome::Cleared { .. } => println!("All data has been cleared."),
        CommitOutcome::Replaced { count } => {
            println!("Data imported successfully! ({count} job applications)")
        }
    }
}

fn print_job(job: &JobApplication) {
    println!(
        "#{} {} at {} [{}] applied {}",
        job.id,
        job.position,
        job.company,
        job.status.label(),
        job.applied_date
    );
    let details = [
        ("location", job.location.as_deref()),
        ("salary", job.salary.as_deref()),
        ("contact", job.contact_email.as_deref()),
        ("url", job.job_url.as_deref()),
        ("notes", job.notes.as_deref()),
    ];
    for (label, value) in details {
        if let Some(value) = value {
            println!("    {label}: {value}");
        }
    }
    if let Some(follow_up) = job.follow_up_date {
        println!("    follow up: {follow_up}");
    }
}

fn print_reminders(reminders: &[&JobApplication]) {
    if reminders.is_empty() {
        return;
    }
    println!("Upcoming follow-ups:");
    for job in reminders {
        if let Some(follow_up) = job.follow_up_date {
            println!("  {} ({}) on {follow_up}", job.company, job.position);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_optional_fields() {
        let cli = Cli::try_parse_from([
            "tracker",
            "add",
            "Tech Corp",
            "Frontend Developer",
            "--status",
            "interview",
            "--follow-up-date",
            "2025-07-01",
        ])
        .expect("parse");
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        let mut draft = JobDraft::blank(NaiveDate::from_ymd_opt(2024, 6, 15).expect("date"));
        args.apply(&mut draft);
        assert_eq!(draft.company, "Tech Corp");
        assert_eq!(draft.status, JobStatus::Interview);
        assert_eq!(draft.follow_up_date, NaiveDate::from_ymd_opt(2025, 7, 1));
        assert_eq!(draft.location, None);
    }

    #[test]
    fn edit_only_touches_given_fields() {
        let cli = Cli::try_parse_from([
            "tracker",
            "edit",
            "1",
            "--salary",
            "$100k",
            "--follow-up-date",
            "",
        ])
        .expect("parse");
        let Command::Edit { id, fields } = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(id, 1);

        let mut draft = JobDraft::blank(NaiveDate::from_ymd_opt(2024, 6, 15).expect("date"));
        draft.company = "Tech Corp".into();
        draft.follow_up_date = NaiveDate::from_ymd_opt(2025, 7, 1);
        fields.apply(&mut draft).expect("apply");

        assert_eq!(draft.company, "Tech Corp");
        assert_eq!(draft.salary.as_deref(), Some("$100k"));
        assert_eq!(draft.follow_up_date, None);
    }

    #[test]
    fn rejects_unknown_status_filter() {
        assert!(Cli::try_parse_from(["tracker", "list", "--filter", "ghosted"]).is_err());
    }
}
