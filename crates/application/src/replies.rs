//! 面向用户的回复文本

use domain::{ComputingId, VerificationOutcome};

pub fn greeting(community: &str) -> String {
    format!(
        "Hello there! You've joined {community}. \
         Please reply with your computing ID so that you can be verified."
    )
}

pub fn already_verified(community: &str) -> String {
    format!("Already verified in {community}!")
}

pub fn verifying(community: &str) -> String {
    format!("VERIFYING FOR {community}...")
}

/// 名册缺失时告知用户，而不是静默跳过
pub fn roster_unavailable(community: &str, support_contact: &str) -> String {
    format!(
        "Verification for {community} is not available yet. \
         Please email {support_contact} if this persists."
    )
}

/// 验证结果对应的回复，`AlreadyVerified` 单独处理
pub fn outcome_messages(
    outcome: &VerificationOutcome,
    community: &str,
    support_contact: &str,
) -> Vec<String> {
    match outcome {
        VerificationOutcome::Success(_) => vec![
            format!(
                "Welcome to {community}! You should now have access to all of the \
                 student channels in the course server. If you have any questions, \
                 send a message in \"#💬general\". Pay attention to \"#📣announcements\" \
                 for important course announcements."
            ),
            "If you would like to specify your pronouns, please refer to \"#pronouns\" for more."
                .to_string(),
        ],
        VerificationOutcome::AlreadyVerified => vec![already_verified(community)],
        VerificationOutcome::InvalidIdentifier => vec![
            format!(
                "Sorry, you either entered an invalid computing id, or you are not on \
                 the class roster for {community}! Please try again."
            ),
            format!(
                "If your id was correct, you may need to be added to the class roster. \
                 In that case, please email {support_contact} to request access."
            ),
        ],
        VerificationOutcome::NonStudentRole => vec![format!(
            "You provided the computing id of a staff member involved with {community}. \
             If this is correct, please email {support_contact} to be verified manually. \
             Otherwise, please try again."
        )],
        VerificationOutcome::DuplicateClaim => vec![
            format!(
                "Sorry, the computing id you entered has already been verified to a \
                 Discord user in {community}."
            ),
            format!(
                "If you did not previously link this computing id or you wish to switch \
                 which Discord user is verified to your id, please email {support_contact} \
                 for help."
            ),
        ],
    }
}

pub fn unverified_report(unmatched: &[ComputingId]) -> String {
    if unmatched.is_empty() {
        return "all the students are verified!".to_string();
    }
    let ids: Vec<&str> = unmatched.iter().map(ComputingId::as_str).collect();
    format!("here are the unverified students: {}", ids.join(", "))
}
