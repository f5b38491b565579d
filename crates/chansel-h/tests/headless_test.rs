use chansel_engine::ChannelSelector;
use chansel_engine::strategy::ProviderProfile;
use chansel_h::HeadlessSession;
use serial_test::serial;

const LOGO_SRC: &str = "data:image/svg+xml,%3Csvg xmlns=%22http://www.w3.org/2000/svg%22 width=%22120%22 height=%2260%22%3E%3C!--espn-logo--%3E%3Crect width=%22120%22 height=%2260%22 fill=%22red%22/%3E%3C/svg%3E";

async fn launch() -> Option<HeadlessSession> {
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .ok();

    let mut session = HeadlessSession::default();
    match session.launch().await {
        Ok(()) => Some(session),
        Err(e) => {
            eprintln!("Failed to launch browser (is Chromium installed?): {}", e);
            None
        }
    }
}

async fn load(session: &HeadlessSession, body: &str) {
    let html = format!("<html><head><title>Player</title></head><body>{}</body></html>", body);
    session
        .client()
        .expect("session launched")
        .page
        .set_content(html)
        .await
        .expect("set_content failed");
}

async fn tuned(session: &HeadlessSession) -> String {
    session
        .client()
        .expect("session launched")
        .page
        .evaluate("String(window.__tuned)")
        .await
        .expect("evaluate failed")
        .into_value::<String>()
        .expect("string result")
}

#[tokio::test]
#[serial]
async fn test_tile_click_with_confirmation() {
    let Some(mut session) = launch().await else {
        return;
    };

    load(
        &session,
        &format!(
            r##"<a href="#" onclick="window.__tuned='espn'; return false;" style="display:inline-block"><img src="{}"></a>
<button id="play" onclick="this.style.display='none'">Play</button>"##,
            LOGO_SRC
        ),
    )
    .await;

    let mut selector = ChannelSelector::default();
    let mut page = session.page().unwrap();
    let profile = ProviderProfile::new("tile", "espn-logo").with_confirm("#play");

    let result = selector.select_channel(&mut page, &profile).await;
    assert!(result.is_success(), "{}", result);
    assert_eq!(tuned(&session).await, "espn");

    session.close().await.expect("close failed");
}

#[tokio::test]
#[serial]
async fn test_guide_row_selected_by_display_name() {
    let Some(mut session) = launch().await else {
        return;
    };

    let rows: String = ["CNN", "ESPN", "Fox News"]
        .iter()
        .map(|name| {
            format!(
                r#"<div data-channel-name="{0}" style="height:40px" onclick="window.__tuned=this.dataset.channelName">{0}<br><small>Live now</small></div>"#,
                name
            )
        })
        .collect();
    load(&session, &rows).await;

    let mut selector = ChannelSelector::default();
    let mut page = session.page().unwrap();

    let result = selector
        .select_channel(&mut page, &ProviderProfile::new("guide", "fox  news"))
        .await;
    assert!(result.is_success(), "{}", result);
    assert_eq!(tuned(&session).await, "Fox News");

    let result = selector
        .select_channel(&mut page, &ProviderProfile::new("guide", "HLN"))
        .await;
    assert!(result.reason().unwrap().contains("not found in guide"));

    session.close().await.expect("close failed");
}

fn guide_rows(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| {
            format!(
                r#"<div data-channel-name="{0}" style="height:40px" onclick="window.__tuned=this.dataset.channelName">{0}</div>"#,
                name
            )
        })
        .collect()
}

#[tokio::test]
#[serial]
async fn test_reordered_guide_clicks_the_wanted_row() {
    let Some(mut session) = launch().await else {
        return;
    };

    let mut selector = ChannelSelector::default();
    let mut page = session.page().unwrap();

    load(&session, &guide_rows(&["CNN", "ESPN"])).await;
    let result = selector
        .select_channel(&mut page, &ProviderProfile::new("guide", "ESPN"))
        .await;
    assert!(result.is_success(), "{}", result);

    load(&session, &guide_rows(&["ESPN", "CNN"])).await;
    let result = selector
        .select_channel(&mut page, &ProviderProfile::new("guide", "CNN"))
        .await;
    assert!(result.is_success(), "{}", result);
    assert_eq!(tuned(&session).await, "CNN");

    session.close().await.expect("close failed");
}

#[tokio::test]
#[serial]
async fn test_restart_clears_strategy_caches() {
    let Some(mut session) = launch().await else {
        return;
    };

    load(
        &session,
        r#"<div data-channel-name="CNN" style="height:40px">CNN</div>"#,
    )
    .await;

    let mut selector = ChannelSelector::default();
    let mut page = session.page().unwrap();
    let result = selector
        .select_channel(&mut page, &ProviderProfile::new("guide", "CNN"))
        .await;
    assert!(result.is_success(), "{}", result);
    assert!(!selector.caches().is_empty());

    session.restart(&mut selector).await.expect("restart failed");
    assert!(selector.caches().is_empty());
    assert!(session.is_ready());

    session.close().await.expect("close failed");
}
