//! The two contracts the backend is asked to satisfy: CareerPlan and OutreachContent.

use super::{Field, Schema};

pub fn career_plan_schema() -> Schema {
    Schema::new(
        "CareerPlan",
        vec![
            resume_field(),
            portfolio_field(),
            Field::object_list(
                "jobSuggestions",
                vec![
                    Field::string("title"),
                    Field::string("company"),
                    Field::string("location"),
                    Field::string("description"),
                    Field::string("matchReason").describe("Why this job is a good fit."),
                    Field::string("applicationUrl")
                        .describe("A plausible example URL to apply."),
                ],
            ),
            Field::object_list(
                "skillRecommendations",
                vec![
                    Field::string("skill"),
                    Field::string("reason")
                        .describe("Why this skill is important for the user's goals."),
                    Field::object_list(
                        "learningResources",
                        vec![Field::string("name"), Field::string("url")],
                    )
                    .describe("A list of 2-3 online resources to learn this skill."),
                ],
            ),
        ],
    )
}

fn resume_field() -> Field {
    Field::object(
        "resume",
        vec![
            Field::string("name").describe("User's full name"),
            Field::string("email").describe("User's email address"),
            Field::string("phone").describe("User's phone number"),
            Field::string("linkedin").describe("URL to user's LinkedIn profile"),
            Field::string("summary").describe("A professional summary of 2-4 sentences."),
            Field::object_list(
                "experience",
                vec![
                    Field::string("title"),
                    Field::string("company"),
                    Field::string("period").describe("e.g., 'Jan 2020 - Present'"),
                    Field::string_list("responsibilities"),
                ],
            ),
            Field::object_list(
                "education",
                vec![
                    Field::string("degree"),
                    Field::string("institution"),
                    Field::string("period").describe("e.g., 'Aug 2016 - May 2020'"),
                ],
            ),
            Field::string_list("skills"),
            Field::string_list("preferences").optional().describe(
                "User's work preferences, e.g., 'Remote/Hybrid', 'Willing to relocate', desired company culture.",
            ),
            Field::string_list("certifications").optional().describe(
                "List of professional certifications, e.g., 'AWS Certified Solutions Architect'.",
            ),
            Field::string_list("methodologies").optional().describe(
                "Development methodologies the user is familiar with, e.g., 'Agile', 'Scrum', 'Kanban'.",
            ),
            Field::string_list("communityAndWriting").optional().describe(
                "Contributions to open-source projects, blogs, or other community involvement.",
            ),
            Field::string_list("careerGoals").optional().describe(
                "User's short-term and long-term career goals, target roles, or learning paths.",
            ),
        ],
    )
}

fn portfolio_field() -> Field {
    Field::object(
        "portfolio",
        vec![
            Field::string("title").describe("A catchy title for the portfolio."),
            Field::string("introduction")
                .describe("A brief introduction about the user's professional self."),
            Field::object_list(
                "projects",
                vec![
                    Field::string("name"),
                    Field::string("description"),
                    Field::string_list("technologies"),
                    Field::string("url").describe("URL to the live project or repository."),
                    Field::string("imageUrl").describe(
                        "URL for a relevant project image or placeholder (e.g., 'https://picsum.photos/seed/project-name/1920/1080').",
                    ),
                    Field::string("role")
                        .describe("The user's specific role and key contributions on the project."),
                    Field::string("outcome").describe(
                        "The tangible outcome or impact of the project, including metrics if possible.",
                    ),
                ],
            ),
        ],
    )
}

pub fn outreach_schema() -> Schema {
    Schema::new(
        "OutreachContent",
        vec![
            Field::string("elevatorPitch").describe(
                "A compelling 30-second elevator pitch (2-4 sentences) summarizing the user's professional identity and goals.",
            ),
            Field::string("linkedinMessage").describe(
                "A concise and professional message (3-5 sentences) for a LinkedIn connection request to a recruiter or professional in their target field. It should be personalized and state the purpose of connecting.",
            ),
            Field::string("informationalInterviewEmail").describe(
                "A professional and respectful email template to request an informational interview. It should have a clear subject line, introduce the user, state the reason for outreach, and propose a brief meeting. Use placeholders like [Their Name] and [Company Name].",
            ),
        ],
    )
}
