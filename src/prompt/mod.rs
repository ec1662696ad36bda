// src/prompt/mod.rs
// Builds the user-side prompt: message, then course context, then history.
// History goes last so the model reads it as supplementary.

pub const COURSE_CONTEXT_LABEL: &str = "[Course Context]";
pub const STUDENT_HISTORY_LABEL: &str = "[Student History]";

const SECTION_SEPARATOR: &str = "\n\n";

/// Assemble the prompt for a single chat turn.
///
/// The message is kept verbatim. Empty context and empty history are
/// treated the same as absent ones.
pub fn assemble(
    user_message: &str,
    course_context: Option<&str>,
    viewed_courses: Option<&[String]>,
) -> String {
    let mut prompt = String::from(user_message);

    if let Some(context) = course_context.filter(|c| !c.is_empty()) {
        prompt.push_str(SECTION_SEPARATOR);
        prompt.push_str(&course_context_block(context));
    }

    if let Some(courses) = viewed_courses.filter(|v| !v.is_empty()) {
        prompt.push_str(SECTION_SEPARATOR);
        prompt.push_str(&history_block(courses));
    }

    prompt
}

fn course_context_block(context: &str) -> String {
    format!("{}\n{}", COURSE_CONTEXT_LABEL, context)
}

fn history_block(courses: &[String]) -> String {
    format!(
        "{}\nThe student has already studied: {}. You can reference these topics if relevant.",
        STUDENT_HISTORY_LABEL,
        courses.join(", ")
    )
}
