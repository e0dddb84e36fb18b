//! 服务测试共用的夹具

use domain::{
    ChannelId, CommunityId, Course, Member, MemberId, PronounTable, Roster, RosterEntry,
};

use crate::platform::memory::{ChannelSnapshot, CommunitySnapshot, MemoryPlatform, PlatformSnapshot};
use crate::roster_source::MockRosterSource;

pub const COMMUNITY: CommunityId = CommunityId(10);
pub const GENERAL: ChannelId = ChannelId(100);
pub const PRONOUNS: ChannelId = ChannelId(101);
pub const BOT: MemberId = MemberId(1);
pub const ADMIN: MemberId = MemberId(2);
pub const STUDENT: MemberId = MemberId(3);
pub const OTHER: MemberId = MemberId(4);
pub const SUPPORT: &str = "cs2100-staff@example.edu";

pub fn platform_with(members: Vec<Member>) -> MemoryPlatform {
    let mut all = vec![
        Member::new(BOT, "UVAuth"),
        Member::new(ADMIN, "prof")
            .with_label("Professor")
            .with_role("Admin")
            .with_role("Staff"),
    ];
    all.extend(members);

    let roles = [
        "Unverified",
        "Admin",
        "Staff",
        "they/them",
        "he/him",
        "any pronouns",
        "she/her",
        "just my name",
        "please ask",
    ];

    MemoryPlatform::from_snapshot(PlatformSnapshot {
        bot_id: BOT,
        communities: vec![CommunitySnapshot {
            id: COMMUNITY,
            name: "CS 2100".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            channels: vec![
                ChannelSnapshot {
                    id: GENERAL,
                    name: "general".to_string(),
                },
                ChannelSnapshot {
                    id: PRONOUNS,
                    name: "pronouns".to_string(),
                },
            ],
            members: all,
        }],
    })
    .with_recording()
}

pub fn course(community: &str) -> Course {
    Course::new(community, "rosters/cs2100.json", SUPPORT)
}

pub fn jane_roster() -> Roster {
    Roster::from_entries([
        RosterEntry::new("ab3ef", "Jane Doe", "Student"),
        RosterEntry::new("cd4gh", "Carl Grey", "Student"),
        RosterEntry::new("ta1", "Tom Assistant", "TA"),
    ])
}

pub fn roster_source(roster: Roster) -> MockRosterSource {
    let mut source = MockRosterSource::new();
    source
        .expect_load_course()
        .returning(|name| Ok(Some(course(name))));
    source
        .expect_load_roster()
        .returning(move |_| Ok(Some(roster.clone())));
    source
}

pub fn pronoun_table() -> PronounTable {
    PronounTable::new([
        ("❤️", "they/them"),
        ("💛", "he/him"),
        ("💚", "any pronouns"),
        ("🧡", "she/her"),
        ("💙", "just my name"),
        ("💜", "please ask"),
    ])
    .unwrap()
}
