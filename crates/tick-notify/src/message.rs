//! Reminder email content.

use std::fmt::Write as _;

use tick_core::entities::Task;

/// Lead time quoted in every reminder subject.
pub const LEAD_MINUTES: u32 = 10;

/// Subject, HTML body, and plain-text alternative for one reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMessage {
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl ReminderMessage {
    #[must_use]
    pub fn for_task(name: &str, task: &Task) -> Self {
        let when = task.scheduled_instant().map_or_else(
            || "Not specified".to_string(),
            |at| at.format("%A, %B %-d, %Y at %H:%M").to_string(),
        );

        let subject = format!(
            "\u{23f0} Reminder: \"{}\" starts in {LEAD_MINUTES} minutes!",
            task.title
        );

        let mut text = format!(
            "Hi {name},\n\nYour task is starting in {LEAD_MINUTES} minutes!\n\n\
             {}\nScheduled time: {when}\nDuration: {} minutes\n",
            task.title, task.duration_minutes
        );
        if let Some(description) = &task.description {
            let _ = writeln!(text, "Description: {description}");
        }
        text.push_str("\nGood luck with your task!\n\n-- \nThis is an automated reminder from Tickler.\n");

        let mut details = format!(
            "<h3 style=\"margin-top: 0; color: #555;\">{}</h3>\n\
             <p><strong>Scheduled time:</strong> {}</p>\n\
             <p><strong>Duration:</strong> {} minutes</p>\n",
            escape(&task.title),
            escape(&when),
            task.duration_minutes
        );
        if let Some(description) = &task.description {
            let _ = writeln!(
                details,
                "<p><strong>Description:</strong> {}</p>",
                escape(description)
            );
        }

        let html = format!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\n\
             <h2 style=\"color: #333;\">Task Reminder</h2>\n\
             <p>Hi <strong>{}</strong>,</p>\n\
             <p>Your task is starting in {LEAD_MINUTES} minutes!</p>\n\
             <div style=\"background: #f5f5f5; padding: 20px; border-radius: 8px; margin: 20px 0;\">\n\
             {details}</div>\n\
             <p>Good luck with your task!</p>\n\
             <hr style=\"border: none; border-top: 1px solid #eee; margin: 30px 0;\">\n\
             <p style=\"font-size: 12px; color: #888;\">This is an automated reminder from Tickler.</p>\n\
             </div>\n",
            escape(name)
        );

        Self {
            subject,
            html,
            text,
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use pretty_assertions::assert_eq;

    fn task(description: Option<&str>) -> Task {
        Task {
            id: "tsk-00000001".into(),
            owner_id: "usr-00000001".into(),
            title: "Staff <Meeting>".into(),
            description: description.map(str::to_string),
            scheduled_date: NaiveDate::from_ymd_opt(2024, 9, 17),
            scheduled_time: NaiveTime::from_hms_opt(14, 0, 0),
            duration_minutes: 45,
            completed: false,
            reminder_sent: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn subject_quotes_the_title() {
        let message = ReminderMessage::for_task("Ada", &task(None));
        assert_eq!(
            message.subject,
            "\u{23f0} Reminder: \"Staff <Meeting>\" starts in 10 minutes!"
        );
    }

    #[test]
    fn html_escapes_user_text() {
        let message = ReminderMessage::for_task("Ada & Bob", &task(Some("Bring <notes>")));
        assert!(message.html.contains("Ada &amp; Bob"));
        assert!(message.html.contains("Staff &lt;Meeting&gt;"));
        assert!(message.html.contains("Bring &lt;notes&gt;"));
        assert!(message.html.contains("45 minutes"));
    }

    #[test]
    fn text_body_lists_schedule_and_optional_description() {
        let without = ReminderMessage::for_task("Ada", &task(None));
        assert!(without.text.contains("Tuesday, September 17, 2024 at 14:00"));
        assert!(!without.text.contains("Description"));

        let with = ReminderMessage::for_task("Ada", &task(Some("Agenda in doc")));
        assert!(with.text.contains("Description: Agenda in doc"));
    }

    #[test]
    fn unscheduled_task_says_not_specified() {
        let mut unscheduled = task(None);
        unscheduled.scheduled_time = None;
        let message = ReminderMessage::for_task("Ada", &unscheduled);
        assert!(message.text.contains("Scheduled time: Not specified"));
    }
}
