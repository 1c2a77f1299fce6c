// Interview system instruction. The turn framing it asks for is parsed in `protocol`.

use crate::interview::protocol::{MAX_QUESTIONS, TURN_DELIMITER};
use crate::models::plan::CareerPlan;

const FALLBACK_ROLE: &str = "a senior software engineer";

/// Builds the interviewer persona, grounded in the plan's career goals.
pub fn interview_system_instruction(plan: &CareerPlan) -> String {
    let goals = plan.career_goals_line();
    let roles = if goals.is_empty() {
        FALLBACK_ROLE.to_string()
    } else {
        goals
    };

    format!(
        "You are an expert interviewer hiring for roles like '{roles}'. Your task is to conduct a mock interview.
- If the user sends the initial message 'start', you MUST ask the first interview question.
- When the user provides an answer to a question, you MUST respond with two parts separated by the unique delimiter '{TURN_DELIMITER}':
  1.  First part: Concise, constructive feedback on their answer (2-3 sentences max).
  2.  Second part: The next interview question.
- Conduct a total of {MAX_QUESTIONS} questions. Your questions should be a mix of behavioral and technical questions relevant to the user's goals.
- After the user provides their final answer, your response MUST be the feedback for that final answer, followed by the delimiter '{TURN_DELIMITER}', and then a final summary paragraph. The summary should highlight the user's performance with 2-3 key strengths and 2-3 areas for improvement.
- Do not add any conversational filler like \"Great, let's move on.\" Just provide the content as requested."
    )
}
