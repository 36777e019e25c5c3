use chrono::NaiveDate;
use shared::domain::{JobApplication, JobId, JobStatus};

/// Records shown on first start, before anything has been saved.
pub fn sample_jobs() -> Vec<JobApplication> {
    vec![
        JobApplication {
            id: JobId(1),
            company: "Tech Corp".into(),
            position: "Frontend Developer".into(),
            location: Some("San Francisco, CA".into()),
            salary: Some("$80,000 - $100,000".into()),
            status: JobStatus::Applied,
            applied_date: ymd(2024, 6, 15),
            follow_up_date: Some(ymd(2025, 7, 1)),
            notes: Some("Applied through LinkedIn".into()),
            contact_email: Some("hr@techcorp.com".into()),
            job_url: Some("https://techcorp.com/careers".into()),
        },
        JobApplication {
            id: JobId(2),
            company: "StartupXYZ".into(),
            position: "Full Stack Engineer".into(),
            location: Some("Remote".into()),
            salary: Some("$90,000 - $120,000".into()),
            status: JobStatus::Interview,
            applied_date: ymd(2024, 6, 10),
            follow_up_date: Some(ymd(2024, 6, 28)),
            notes: Some("Phone screening completed, technical interview scheduled".into()),
            contact_email: Some("hiring@startupxyz.com".into()),
            job_url: Some("https://startupxyz.com/jobs".into()),
        },
    ]
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
