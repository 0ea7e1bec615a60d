//! Classification prompt.

use chrono::NaiveDate;

use tick_core::schedule::DATE_FORMAT;

/// Build the instruction sent with each transcript.
///
/// `today` anchors relative dates ("tomorrow", "next Monday").
#[must_use]
pub fn build_prompt(transcript: &str, today: NaiveDate) -> String {
    let transcript = transcript.trim().replace('"', "'");
    let today = today.format(DATE_FORMAT);
    format!(
        r#"You are a task management assistant. Convert the following voice command into a structured JSON response.

Voice Command: "{transcript}"

Based on the command, determine the action and extract relevant information. Respond with ONLY a JSON object in one of these formats:

For CREATE TASK:
{{
  "action": "create_task",
  "data": {{
    "title": "extracted title",
    "description": "extracted description",
    "date": "YYYY-MM-DD",
    "time": "HH:MM (24-hour)",
    "duration": number_in_minutes
  }}
}}

For MARK COMPLETED:
{{
  "action": "mark_completed",
  "data": {{
    "taskTitle": "task name to mark as completed"
  }}
}}

For EMAIL NEXT MEETING:
{{
  "action": "email_next_meeting"
}}

For LIST TASKS:
{{
  "action": "list_tasks",
  "filter": "all" | "pending" | "completed" | "today" | "tomorrow"
}}

Rules:
- Use the current year if the year is not specified
- Convert relative dates (today, tomorrow, next week) to actual dates
- Convert 12-hour time to 24-hour format
- Default duration is 60 minutes if not specified
- If the date or time is unclear, use "TBD"
- Today's date is {today}

Examples:
"Schedule a meeting tomorrow at 2 PM" -> date: tomorrow's date, time: "14:00"
"Create task for staff meeting on 17th September" -> date: the 17th of September this year
"Mark staff meeting as completed" -> action: "mark_completed", taskTitle: "staff meeting"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_transcript_and_date() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 16).unwrap();
        let prompt = build_prompt("  Create task for staff meeting tomorrow at 2pm ", today);
        assert!(prompt.contains("Voice Command: \"Create task for staff meeting tomorrow at 2pm\""));
        assert!(prompt.contains("Today's date is 2024-09-16"));
        assert!(prompt.contains("\"action\": \"list_tasks\""));
    }

    #[test]
    fn embedded_quotes_cannot_close_the_command() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 16).unwrap();
        let prompt = build_prompt(r#"Say "done""#, today);
        assert!(prompt.contains("Voice Command: \"Say 'done'\""));
    }
}
