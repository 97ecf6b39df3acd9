use crate::{
    document::Document,
    fetch::fetch_pair,
    format::escape_html,
    Bootstrap, CommitteeRole, Member,
};

use super::{members::member_figure, show_empty, show_load_failure, show_rendered, RenderOutcome};

/// Roles by ascending `order` (missing counts as 0, ties keep their input
/// order), each with the first member assigned to it. If several members
/// claim the same role only the first one is shown.
pub fn pair_committee<'a>(
    mut roles: Vec<CommitteeRole>,
    members: &'a [Member],
) -> Vec<(CommitteeRole, Option<&'a Member>)> {
    roles.sort_by(|a, b| a.order.unwrap_or(0.0).total_cmp(&b.order.unwrap_or(0.0)));
    roles
        .into_iter()
        .map(|role| {
            let assigned = members
                .iter()
                .find(|m| m.committee_role_id.as_deref() == Some(role.id.as_str()));
            (role, assigned)
        })
        .collect()
}

pub fn committee_card(role: &CommitteeRole, assigned: Option<&Member>) -> String {
    let description = role
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!(r#"<p class="card-subtitle">{}</p>"#, escape_html(d)))
        .unwrap_or_default();
    let holder = match assigned {
        Some(member) => format!(
            r#"<div class="member-card">
      {}
      </div>"#,
            member_figure(member)
        ),
        None => r#"<p class="text-muted">Position currently vacant</p>"#.to_string(),
    };

    format!(
        r#"
    <div class="card">
      <h3 class="card-title">{}</h3>
      {description}
      {holder}
    </div>
  "#,
        escape_html(&role.title)
    )
}

pub fn render_committee(
    bootstrap: &Bootstrap,
    doc: &mut dyn Document,
    container_id: &str,
) -> RenderOutcome {
    if !doc.has_container(container_id) {
        return RenderOutcome::MissingContainer;
    }

    let (roles, members) = match fetch_pair::<Vec<CommitteeRole>, Vec<Member>>(
        bootstrap.source(),
        "committee-roles.json",
        "members.json",
    ) {
        (Ok(roles), Ok(members)) => (roles, members),
        _ => return show_load_failure(doc, container_id, "Unable to load committee"),
    };

    let committee = pair_committee(roles, &members);
    if committee.is_empty() {
        return show_empty(
            doc,
            container_id,
            "No committee roles",
            "Committee positions will be announced soon.",
        );
    }

    let html: String = committee
        .iter()
        .map(|(role, assigned)| committee_card(role, *assigned))
        .collect();
    show_rendered(doc, container_id, &html, committee.len())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{document::HtmlPage, fetch::testing::MemorySource};

    fn role(id: &str, order: Option<f64>) -> CommitteeRole {
        CommitteeRole {
            id: id.to_string(),
            title: id.to_uppercase(),
            order,
            ..Default::default()
        }
    }

    fn member(id: &str, role: Option<&str>) -> Member {
        Member {
            id: id.to_string(),
            display_name: id.to_string(),
            committee_role_id: role.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_roles_sorted_by_order() {
        let roles = vec![
            role("treasurer", Some(3.0)),
            role("chair", Some(1.0)),
            role("webmaster", None),
            role("secretary", Some(2.0)),
            role("social", None),
        ];
        let ids: Vec<String> = pair_committee(roles, &[])
            .into_iter()
            .map(|(role, _)| role.id)
            .collect();
        assert_eq!(
            ids,
            vec!["webmaster", "social", "chair", "secretary", "treasurer"]
        );
    }

    #[test]
    fn test_first_assigned_member_wins() {
        let roles = vec![role("chair", Some(1.0)), role("treasurer", Some(2.0))];
        let members = vec![
            member("m1", None),
            member("m2", Some("chair")),
            member("m3", Some("chair")),
        ];
        let committee = pair_committee(roles, &members);
        assert_eq!(committee[0].1.map(|m| m.id.as_str()), Some("m2"));
        assert!(committee[1].1.is_none());
    }

    #[test]
    fn test_committee_card() {
        let mut chair = role("chair", Some(1.0));
        chair.description = Some("Runs the club".to_string());
        let ann = member("Ann", Some("chair"));
        let html = committee_card(&chair, Some(&ann));
        assert!(html.contains(r#"<h3 class="card-title">CHAIR</h3>"#));
        assert!(html.contains(r#"<p class="card-subtitle">Runs the club</p>"#));
        assert!(html.contains(r#"<div class="member-name">Ann</div>"#));

        let html = committee_card(&role("treasurer", None), None);
        assert!(html.contains("Position currently vacant"));
        assert!(!html.contains("card-subtitle"));
    }

    #[test]
    fn test_render_committee() {
        let source = MemorySource::default()
            .with(
                "data/committee-roles.json",
                r#"[{"id":"treasurer","title":"Treasurer","order":2},{"id":"chair","title":"Chair","order":1}]"#,
            )
            .with(
                "data/members.json",
                r#"[{"id":"m1","displayName":"Ann","committeeRoleId":"treasurer"}]"#,
            );
        let bootstrap =
            Bootstrap::new(Box::new(source), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut page = HtmlPage::new(r#"<div id="committee-roles"></div>"#);
        let outcome = render_committee(&bootstrap, &mut page, "committee-roles");
        assert_eq!(outcome, RenderOutcome::Rendered(2));

        let html = page.html();
        assert!(html.find(">Chair<").unwrap() < html.find(">Treasurer<").unwrap());
        assert_eq!(html.matches("Position currently vacant").count(), 1);
    }

    #[test]
    fn test_render_committee_without_roles() {
        let source = MemorySource::default()
            .with("data/committee-roles.json", "[]")
            .with("data/members.json", "[]");
        let bootstrap =
            Bootstrap::new(Box::new(source), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut page = HtmlPage::new(r#"<div id="committee-roles"></div>"#);
        assert_eq!(
            render_committee(&bootstrap, &mut page, "committee-roles"),
            RenderOutcome::Empty
        );
        assert!(page.html().contains("No committee roles"));
    }

    #[test]
    fn test_render_committee_load_failure() {
        let source = MemorySource::default().with("data/committee-roles.json", "[]");
        let bootstrap =
            Bootstrap::new(Box::new(source), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut page = HtmlPage::new(r#"<div id="committee-roles"></div>"#);
        assert_eq!(
            render_committee(&bootstrap, &mut page, "committee-roles"),
            RenderOutcome::LoadFailed
        );
        assert!(page.html().contains("Unable to load committee"));
    }
}
