//! Prompt templates for each phase of a team run

use crate::session::entities::Message;
use crate::team::entities::TeamProfile;
use crate::team::parsing::{CONFLICT_SENTINEL, NO_CONFLICT_SENTINEL};
use crate::team::value_objects::EVIDENCE_SEPARATOR;

/// Name and role of a member, as listed to the leader.
pub type MemberCard<'a> = (&'a str, &'a str);

/// Templates for generating leader prompts at each phase
pub struct TeamPromptTemplate;

impl TeamPromptTemplate {
    /// System prompt describing the team to its leader model
    pub fn leader_system(profile: &TeamProfile) -> String {
        let mut prompt = format!("You are the leader of the team \"{}\".", profile.name);
        if !profile.role.trim().is_empty() {
            prompt.push_str(&format!("\nTeam role: {}", profile.role));
        }
        if !profile.description.trim().is_empty() {
            prompt.push_str(&format!("\nTeam description: {}", profile.description));
        }
        prompt.push_str(
            "\nYou direct the team members, weigh their contributions and speak for the team.",
        );
        prompt
    }

    /// System prompt for a model-backed member
    pub fn responder_system(name: &str, role: &str, instructions: &str) -> String {
        let mut prompt = format!("You are {}.", name);
        if !role.trim().is_empty() {
            prompt.push_str(&format!(" Your role: {}.", role));
        }
        if !instructions.trim().is_empty() {
            prompt.push('\n');
            prompt.push_str(instructions.trim());
        }
        prompt
    }

    fn member_list(members: &[MemberCard<'_>]) -> String {
        members
            .iter()
            .enumerate()
            .map(|(i, (name, role))| format!("{}. {} - {}", i + 1, name, role))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Ask the leader to pick exactly one member for the request
    pub fn route_prompt(request: &str, members: &[MemberCard<'_>]) -> String {
        format!(
            r#"Select the single team member best suited to handle the request below.

Available members:
{}

Request:
{}

Reply with the exact name of the chosen member and nothing else."#,
            Self::member_list(members),
            request
        )
    }

    /// Ask the leader for a delegation plan
    pub fn coordination_plan_prompt(request: &str, members: &[MemberCard<'_>]) -> String {
        format!(
            r#"Plan how the team should handle the request below.

Available members:
{}

Request:
{}

For each member that should contribute, write one line in the form
"<member name>: <sub-task>". Keep sub-tasks concrete and non-overlapping."#,
            Self::member_list(members),
            request
        )
    }

    fn evidence_block(evidence: &[String]) -> String {
        if evidence.is_empty() {
            "(no member produced a response)".to_string()
        } else {
            evidence.join(EVIDENCE_SEPARATOR)
        }
    }

    /// Ask the leader to merge member outputs (Coordinate mode)
    pub fn synthesis_prompt(request: &str, evidence: &[String]) -> String {
        format!(
            r#"Original request:
{}

Team member responses:
{}

Combine the responses above into one complete, coherent answer to the original request.
Resolve overlaps, keep every relevant detail and do not mention the team members."#,
            request,
            Self::evidence_block(evidence)
        )
    }

    /// Ask the leader to merge answers given to the same prompt (Collaborate mode)
    pub fn collaboration_synthesis_prompt(request: &str, evidence: &[String]) -> String {
        format!(
            r#"Every team member answered the same request independently.

Request:
{}

Answers:
{}

Write a single answer that integrates the strongest points of all answers.
Where the answers agree, state the shared conclusion with confidence."#,
            request,
            Self::evidence_block(evidence)
        )
    }

    /// Ask the leader whether the answers contradict each other
    pub fn conflict_analysis_prompt(request: &str, answers: &[String]) -> String {
        let mut prompt = format!(
            r#"Analyze the following answers to the same request and decide whether they contradict each other.

Request:
{}
"#,
            request
        );

        for (i, answer) in answers.iter().enumerate() {
            prompt.push_str(&format!("\n--- Answer {} ---\n{}\n", i + 1, answer));
        }

        prompt.push_str(&format!(
            r#"
Rules:
1. Differences in wording, detail or emphasis are NOT conflicts.
2. Incompatible facts, numbers, recommendations or conclusions ARE conflicts.
3. Start your reply with exactly "{}" if any conflict exists, otherwise with exactly "{}".
4. Then explain briefly which statements conflict and why."#,
            CONFLICT_SENTINEL, NO_CONFLICT_SENTINEL
        ));

        prompt
    }

    /// Ask the leader to reconcile contradicting answers
    pub fn conflict_resolution_prompt(request: &str, answers: &[String], analysis: &str) -> String {
        let mut prompt = format!(
            r#"Team members gave contradicting answers to the same request.

Request:
{}
"#,
            request
        );

        for (i, answer) in answers.iter().enumerate() {
            prompt.push_str(&format!("\n--- Answer {} ---\n{}\n", i + 1, answer));
        }

        prompt.push_str(&format!(
            r#"
Conflict analysis:
{}

Produce one reconciled answer. Decide each contested point on the strength of the
supporting reasoning, say so briefly where the evidence is uncertain, and answer the
request directly."#,
            analysis
        ));

        prompt
    }

    /// Ask a model to summarize a session's conversation
    pub fn session_summary_prompt(messages: &[Message]) -> String {
        let mut prompt = String::from(
            "Summarize the conversation below in a few sentences. Keep names, decisions and open questions.\n",
        );
        for message in messages {
            prompt.push_str(&format!("\n{}: {}", message.role.as_str(), message.content));
        }
        prompt
    }
}
