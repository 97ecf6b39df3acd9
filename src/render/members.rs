use crate::{
    document::Document,
    fetch::{fetch_data, fetch_pair},
    find_by_index,
    format::{escape_html, member_image},
    Bootstrap, Member, SiteIndex, Team,
};

use super::{show_empty, show_load_failure, show_rendered, RenderOutcome};

/// The outcome of resolving a team to its members
#[derive(Debug, PartialEq)]
pub enum Roster<'a> {
    TeamNotFound,
    NoMembers,
    Members(Vec<&'a Member>),
}

/// Members of `team_id`, in the order they appear in `members`. Ids the
/// team lists but `members` lacks are dropped.
pub fn select_roster<'a>(teams: &[Team], members: &'a [Member], team_id: &str) -> Roster<'a> {
    let Some(team) = find_by_index(teams, team_id) else {
        return Roster::TeamNotFound;
    };
    if team.members.is_empty() {
        return Roster::NoMembers;
    }

    let roster: Vec<&Member> = members
        .iter()
        .filter(|member| team.members.iter().any(|id| id == member.index()))
        .collect();
    if roster.is_empty() {
        Roster::NoMembers
    } else {
        Roster::Members(roster)
    }
}

pub fn select_active(members: &[Member]) -> Vec<&Member> {
    members.iter().filter(|m| m.is_active()).collect()
}

pub fn select_passive(members: &[Member]) -> Vec<&Member> {
    members.iter().filter(|m| m.is_passive()).collect()
}

/// Photo (or placeholder) and name
pub(crate) fn member_figure(member: &Member) -> String {
    let (src, alt) = member_image(member.image.as_deref(), &member.display_name);
    format!(
        r#"<img src="{}" alt="{}" class="member-image">
      <div class="member-name">{}</div>"#,
        escape_html(&src),
        escape_html(&alt),
        escape_html(&member.display_name)
    )
}

pub fn member_card(member: &Member) -> String {
    let role = member
        .role
        .as_deref()
        .filter(|r| !r.is_empty())
        .map(|r| format!(r#"<div class="member-role">{}</div>"#, escape_html(r)))
        .unwrap_or_default();

    format!(
        r#"
    <div class="member-card">
      {}
      {role}
    </div>
  "#,
        member_figure(member)
    )
}

fn member_grid(members: &[&Member], columns: u8) -> String {
    let cards: String = members.iter().map(|m| member_card(m)).collect();
    format!(
        r#"
    <div class="grid grid-{columns}">
      {cards}
    </div>
  "#
    )
}

/// Render the members of `team_id` into `container_id`
pub fn render_team_roster(
    bootstrap: &Bootstrap,
    doc: &mut dyn Document,
    team_id: &str,
    container_id: &str,
) -> RenderOutcome {
    if !doc.has_container(container_id) {
        return RenderOutcome::MissingContainer;
    }

    let (teams, members) = match fetch_pair::<Vec<Team>, Vec<Member>>(
        bootstrap.source(),
        "teams.json",
        "members.json",
    ) {
        (Ok(teams), Ok(members)) => (teams, members),
        _ => return show_load_failure(doc, container_id, "Unable to load roster"),
    };

    match select_roster(&teams, &members, team_id) {
        Roster::TeamNotFound => show_empty(
            doc,
            container_id,
            "Team not found",
            "The requested team could not be found.",
        ),
        Roster::NoMembers => show_empty(
            doc,
            container_id,
            "No team members yet",
            "This team is currently being formed. Check back soon!",
        ),
        Roster::Members(roster) => {
            show_rendered(doc, container_id, &member_grid(&roster, 3), roster.len())
        }
    }
}

pub fn render_active_members(
    bootstrap: &Bootstrap,
    doc: &mut dyn Document,
    container_id: &str,
) -> RenderOutcome {
    render_member_list(bootstrap, doc, container_id, select_active, "No active members")
}

pub fn render_passive_members(
    bootstrap: &Bootstrap,
    doc: &mut dyn Document,
    container_id: &str,
) -> RenderOutcome {
    render_member_list(bootstrap, doc, container_id, select_passive, "No passive members")
}

fn render_member_list(
    bootstrap: &Bootstrap,
    doc: &mut dyn Document,
    container_id: &str,
    select: fn(&[Member]) -> Vec<&Member>,
    empty_title: &str,
) -> RenderOutcome {
    if !doc.has_container(container_id) {
        return RenderOutcome::MissingContainer;
    }

    let members: Vec<Member> = match fetch_data(bootstrap.source(), "members.json") {
        Ok(members) => members,
        Err(_) => return show_load_failure(doc, container_id, "Unable to load members"),
    };

    let selected = select(&members);
    if selected.is_empty() {
        return show_empty(
            doc,
            container_id,
            empty_title,
            "Member information will be available soon.",
        );
    }

    show_rendered(doc, container_id, &member_grid(&selected, 4), selected.len())
}
