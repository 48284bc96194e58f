// Integration suite: shipped catalogs, the filter and detail scenarios, page
// assembly, and the helper binaries end to end.
mod support;

use aef_spotlight::site::{PageChrome, render_page};
use aef_spotlight::{
    AccountMenu, AuthProvider, BrowseSession, CatalogIndex, CatalogKey, CategoryFilter,
    ClickTarget, ContentItem, CurrentUser, DetailOutcome, DetailState, ItemId, NavigationIntent,
    SiteNav, SitePage, activate, default_catalog_path, derive_visible, load_repository,
    render_detail_html,
};
use anyhow::{Result, bail};
use serde_json::Value;
use std::fs;
use support::{
    abc_catalog, helper_command, read_file, repo_root, run_command, stdout_string, write_catalog,
};
use tempfile::TempDir;

fn ids(items: &[&ContentItem]) -> Vec<ItemId> {
    items.iter().map(|item| item.id.clone()).collect()
}

fn load_abc() -> Result<CatalogIndex> {
    let file = write_catalog(&abc_catalog())?;
    CatalogIndex::load(file.path())
}

#[test]
fn shipped_catalogs_validate() -> Result<()> {
    let repository = load_repository(&repo_root())?;
    let spotlight = repository
        .get(&CatalogKey::Spotlight)
        .expect("spotlight catalog present");
    assert_eq!(spotlight.categories().len(), 7);
    for item in spotlight.items() {
        assert!(item.slug.is_some(), "{} should have a slug", item.id);
        let category = item.category_str().expect("articles are categorized");
        assert!(
            spotlight.categories().iter().any(|c| c == category),
            "{} uses unlisted category {category}",
            item.id
        );
    }

    let forums = repository
        .get(&CatalogKey::Forums)
        .expect("forums catalog present");
    assert!(forums.item(&ItemId::Numeric(1)).is_some());
    Ok(())
}

#[test]
fn filter_a_keeps_catalog_order() -> Result<()> {
    let index = load_abc()?;
    let visible = derive_visible(index.items(), &CategoryFilter::only("A"));
    assert_eq!(ids(&visible), vec![ItemId::Numeric(1), ItemId::Numeric(3)]);
    Ok(())
}

#[test]
fn filter_all_returns_full_catalog() -> Result<()> {
    let index = load_abc()?;
    let visible = derive_visible(index.items(), &CategoryFilter::from_str("All"));
    assert_eq!(
        ids(&visible),
        vec![ItemId::Numeric(1), ItemId::Numeric(2), ItemId::Numeric(3)]
    );
    Ok(())
}

#[test]
fn select_then_clear_closes_detail() -> Result<()> {
    let index = load_abc()?;
    let mut session = BrowseSession::new(index.items());
    let second = index.item(&ItemId::Numeric(2));

    session.select(second);
    assert_eq!(session.selected().map(|item| &item.id), Some(&ItemId::Numeric(2)));
    assert!(render_detail_html(session.detail(), index.key()).contains("Second overview."));

    session.select(None);
    assert_eq!(session.detail(), DetailState::Closed);
    assert!(render_detail_html(session.detail(), index.key()).is_empty());
    Ok(())
}

#[test]
fn overview_only_record_omits_stakeholders() -> Result<()> {
    let index = load_abc()?;
    let item = index.item(&ItemId::Numeric(2)).expect("item 2");
    assert!(item.stakeholders.is_none());
    let html = render_detail_html(DetailState::Open(item), index.key());
    assert!(html.contains("<h3>Overview</h3>"));
    assert!(!html.contains("Stakeholders"));
    assert_eq!(html.matches("<section").count(), 1);
    Ok(())
}

#[test]
fn close_controls_share_one_transition() -> Result<()> {
    let index = load_abc()?;
    let mut session = BrowseSession::new(index.items());
    session.select(index.item(&ItemId::Numeric(1)));
    assert_eq!(session.handle_click(ClickTarget::Panel), DetailOutcome::Contained);
    assert_eq!(session.handle_click(ClickTarget::FooterClose), DetailOutcome::Closed);
    session.close();
    assert_eq!(session.detail(), DetailState::Closed);
    Ok(())
}

#[test]
fn activating_a_card_emits_its_route() -> Result<()> {
    let index = load_abc()?;
    let item = index.item(&ItemId::Numeric(3)).expect("item 3");
    assert_eq!(
        activate(index.key(), item),
        NavigationIntent::Item {
            path: "/spotlight/item-three".to_string()
        }
    );
    Ok(())
}

struct FlakyAuth;

impl AuthProvider for FlakyAuth {
    fn current_user(&self) -> Option<CurrentUser> {
        Some(CurrentUser {
            full_name: Some("Test User".into()),
            ..Default::default()
        })
    }

    fn sign_out(&mut self) -> Result<()> {
        bail!("token revocation timed out")
    }
}

#[test]
fn sign_out_failure_does_not_touch_browse_state() -> Result<()> {
    let index = load_abc()?;
    let mut session = BrowseSession::new(index.items());
    session.set_category(CategoryFilter::only("B"));
    session.select(index.item(&ItemId::Numeric(2)));

    let mut auth = FlakyAuth;
    let mut menu = AccountMenu::default();
    menu.toggle();
    assert!(menu.sign_out(&mut auth).is_err());
    assert!(menu.is_open());

    assert_eq!(ids(session.visible()), vec![ItemId::Numeric(2)]);
    assert!(session.detail().is_open());

    let nav = SiteNav::new(SitePage::Spotlight);
    let user = auth.current_user();
    let page = render_page(
        &index,
        &session,
        &PageChrome {
            nav: &nav,
            account: &menu,
            user: user.as_ref(),
        },
    );
    assert!(page.contains("account-menu"));
    assert!(page.contains("detail-overlay"));
    Ok(())
}

#[test]
fn catalog_check_reports_category_counts() -> Result<()> {
    let file = write_catalog(&abc_catalog())?;
    let mut cmd = helper_command("catalog-check");
    cmd.arg("--catalog").arg(file.path());
    let stdout = stdout_string(&run_command(cmd)?);
    assert!(stdout.contains("Fixture (spotlight)"));
    assert!(stdout.contains("items     : 3"));
    assert!(
        stdout
            .lines()
            .any(|line| line.trim_start().starts_with('A') && line.trim_end().ends_with('2'))
    );
    Ok(())
}

#[test]
fn catalog_check_rejects_duplicate_ids() -> Result<()> {
    let mut value = abc_catalog();
    value["items"][1]["id"] = Value::from(1);
    let file = write_catalog(&value)?;
    let mut cmd = helper_command("catalog-check");
    cmd.arg("--catalog").arg(file.path());
    let output = cmd.output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicate item id 1"));
    Ok(())
}

#[test]
fn catalog_check_rejects_ids_sharing_a_route() -> Result<()> {
    let mut value = abc_catalog();
    value["items"][0]["slug"] = Value::from("x");
    value["items"][1]["id"] = Value::from("x");
    value["items"][1]
        .as_object_mut()
        .expect("item object")
        .remove("slug");
    let file = write_catalog(&value)?;
    let mut cmd = helper_command("catalog-check");
    cmd.arg("--catalog").arg(file.path());
    let output = cmd.output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicate item route 'x'"));
    Ok(())
}

#[test]
fn spotlight_list_json_filters_by_category() -> Result<()> {
    let file = write_catalog(&abc_catalog())?;
    let mut cmd = helper_command("spotlight-list");
    cmd.arg("--catalog")
        .arg(file.path())
        .arg("--category")
        .arg("A")
        .arg("--format")
        .arg("json");
    let value: Value = serde_json::from_slice(&run_command(cmd)?.stdout)?;
    assert_eq!(value["filter"], "A");
    let routes: Vec<&str> = value["items"]
        .as_array()
        .expect("items array")
        .iter()
        .filter_map(|item| item["route"].as_str())
        .collect();
    assert_eq!(routes, vec!["/spotlight/item-one", "/spotlight/item-three"]);
    Ok(())
}

#[test]
fn spotlight_list_tolerates_stale_category() -> Result<()> {
    let mut cmd = helper_command("spotlight-list");
    cmd.arg("--category").arg("Retired Category");
    let stdout = stdout_string(&run_command(cmd)?);
    assert!(stdout.contains("No articles found in this category."));
    Ok(())
}

#[test]
fn item_detail_renders_shipped_forum() -> Result<()> {
    let mut cmd = helper_command("item-detail");
    cmd.arg("--id").arg("2");
    let stdout = stdout_string(&run_command(cmd)?);
    assert!(stdout.starts_with("Trade and Industrialization Forum\n"));
    let overview = stdout.find("Overview").expect("overview");
    let pillars = stdout.find("Strategic Pillars").expect("pillars");
    let purpose = stdout.find("Forum Purpose").expect("purpose");
    assert!(overview < pillars && pillars < purpose);
    Ok(())
}

#[test]
fn item_detail_unknown_id_fails() -> Result<()> {
    let mut cmd = helper_command("item-detail");
    cmd.arg("--id").arg("999");
    let output = cmd.output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no item '999'"));
    Ok(())
}

#[test]
fn render_site_writes_listing_and_item_pages() -> Result<()> {
    let out = TempDir::new()?;
    let mut cmd = helper_command("render-site");
    cmd.arg("--out")
        .arg(out.path())
        .arg("--user-name")
        .arg("Wangari Maathai")
        .arg("--category")
        .arg("Flagship Platform")
        .arg("--select")
        .arg("aef-flagship-summit");
    run_command(cmd)?;

    let spotlight = read_file(&out.path().join("spotlight.html"));
    assert!(spotlight.contains(">WM</span>"));
    assert!(spotlight.contains("Announcing the AEF Flagship Summit"));
    assert!(!spotlight.contains("Harmonizing Investment Rules"));
    assert!(spotlight.contains("detail-overlay"));

    let meetings = read_file(&out.path().join("meetings.html"));
    assert!(meetings.contains("Energy Transition Forum"));
    assert!(!meetings.contains("detail-overlay"));

    let forum_page = read_file(&out.path().join("meetings").join("1.html"));
    assert!(forum_page.contains("detail-overlay"));
    assert!(
        out.path()
            .join("spotlight")
            .join("policy-harmonization-brief.html")
            .is_file()
    );

    let index = CatalogIndex::load(&default_catalog_path(&repo_root(), &CatalogKey::Forums))?;
    let forum_pages = fs::read_dir(out.path().join("meetings"))?.count();
    assert_eq!(forum_pages, index.items().len());
    Ok(())
}
