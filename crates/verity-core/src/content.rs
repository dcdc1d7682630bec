//! Static screen text for the study.
//!
//! Kept in the core so flow and wording stay together; the CLI only
//! renders these strings.

use indoc::indoc;

/// Labels for the 6-point scale, indexed by rating value.
pub const SCALE_LABELS: [&str; 6] = [
    "Doesn't make sense",
    "Definitely false",
    "Probably false",
    "Could be true or false",
    "Probably true",
    "Definitely true",
];

pub const CONSENT_TEXT: &str = indoc! {"
    Consent to Participate in Research

    The task you are about to do involves making simple responses to words
    and sentences, e.g. rating how true you think a given sentence is.
    Detailed instructions follow on the next screen.

    This task has no direct benefits and no anticipated psychosocial risks.
    You are free to decline to participate or to end participation at any
    time for any reason. Data from partial responses is not retained.

    By choosing 'I Agree' you consent to participate in this task and
    affirm that you are at least 18 years old.
"};

pub const CONSENT_DECLINED_TEXT: &str =
    "You did not consent. The study has been ended. Thank you for your time.";

pub const INSTRUCTION_PAGES: [&str; 3] = [
    indoc! {"
        Welcome to the Statement Rating Study

        You will read a series of statements and rate how true or false
        each one is. There are no right or wrong answers; we are interested
        in your honest opinion about each statement.
    "},
    indoc! {"
        Rating Scale

        You will rate each statement using this 6-point scale:

          0 = This statement doesn't make sense at all
          1 = Definitely false
          2 = Probably false
          3 = Could be true or false
          4 = Probably true
          5 = Definitely true
    "},
    indoc! {"
        What to Expect

        Each statement appears one at a time. Read each statement carefully
        and select the number that best represents your judgment.
    "},
];

pub const RATING_PROMPT: &str = "How true or false is this statement?";

pub fn break_text(completed: usize, total: usize) -> String {
    format!(
        "You've completed {completed} out of {total} statements.\n\
         Press Enter when you're ready to continue."
    )
}

pub fn thank_you_text(completion_code: &str) -> String {
    format!(
        "Task Complete!\n\
         Thank you for your participation!\n\
         Your completion code: {completion_code}"
    )
}
