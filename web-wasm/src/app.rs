//! 메인 애플리케이션 컴포넌트
//!
//! 화면 상태는 공통 라이브러리의 Session이 갖고, 설정/히스토리는
//! 시작할 때 localStorage에서 한 번 읽어 Preferences 신호로 들고 있다.

use crate::api::{self, Engine};
use crate::components::{
    export_buttons::ExportButtons, header::Header, history_panel::HistoryPanel,
    progress_bar::ProgressBar, report_view::ReportView, settings_panel::SettingsPanel,
    upload_area::UploadArea,
};
use crate::storage;
use gloo::timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use policy_review_common::preferences::{PreferenceStore, Preferences};
use policy_review_common::session::PROGRESS_TICK_MS;
use policy_review_common::{HistoryEntry, Phase, Session};

/// 설정 저장. 실패해도 화면 동작은 계속한다.
fn persist(preferences: &Preferences) {
    if let Err(e) = storage::preference_store().save(preferences) {
        web_sys::console::warn_1(&format!("설정 저장 실패: {}", e).into());
    }
}

#[component]
pub fn App() -> impl IntoView {
    let initial = storage::preference_store().load().unwrap_or_default();
    storage::apply_dark_mode(initial.dark_mode);

    let prefs = RwSignal::new(initial);
    let session = RwSignal::new(Session::default());
    let engine = RwSignal::new(Engine::default());
    let server_url = RwSignal::new(storage::load_server_url());
    let show_history = RwSignal::new(false);

    let dark_mode = Signal::derive(move || prefs.with(|p| p.dark_mode));
    let history = Signal::derive(move || prefs.with(|p| p.history.clone()));
    let history_count = Signal::derive(move || prefs.with(|p| p.history.len()));
    let api_key = Signal::derive(move || prefs.with(|p| p.api_key.clone()));
    let phase = move || session.with(|s| s.phase());
    let progress = Signal::derive(move || session.with(|s| s.progress()));
    let report = Signal::derive(move || session.with(|s| s.report().cloned()));

    let on_toggle_dark = move |_| {
        prefs.update(|p| {
            storage::apply_dark_mode(p.toggle_dark_mode());
            persist(p);
        });
    };

    let on_toggle_history = move |_| show_history.update(|v| *v = !*v);

    let on_open_history = move |entry: HistoryEntry| {
        if let Some(report) = entry.report {
            session.update(|s| {
                s.open_report(report);
            });
            show_history.set(false);
        }
    };

    let on_clear_history = move |_| {
        prefs.update(|p| {
            p.clear_history();
            persist(p);
        });
        show_history.set(false);
    };

    let on_save_api_key = move |key: String| {
        prefs.update(|p| {
            p.api_key = Some(key);
            persist(p);
        });
    };

    let on_clear_api_key = move |_| {
        prefs.update(|p| {
            p.api_key = None;
            persist(p);
        });
    };

    let on_server_url = move |url: String| {
        storage::save_server_url(&url);
        server_url.set(url.trim().to_string());
    };

    let on_analyze = move |_| {
        let Some(ticket) = session.try_update(|s| s.start_analysis()).flatten() else {
            return;
        };
        let Some(document) = session.with_untracked(|s| s.document().cloned()) else {
            return;
        };
        let upload = session.with_untracked(|s| s.upload_bytes().map(<[u8]>::to_vec));
        let engine = engine.get_untracked();
        let base_url = server_url.get_untracked();
        let key = prefs.with_untracked(|p| p.api_key.clone());

        // 진행률은 장식용 타이머. 응답이 오면 멈춘다.
        let ticker = Interval::new(PROGRESS_TICK_MS, move || {
            session.update(|s| s.tick_progress(js_sys::Math::random()));
        });

        spawn_local(async move {
            let outcome = api::analyze(engine, &base_url, &document, upload.as_deref(), key.as_deref()).await;
            drop(ticker);

            let finished = outcome.as_ref().ok().cloned();
            let applied = session
                .try_update(|s| s.finish(ticket, outcome))
                .unwrap_or(false);

            if let (true, Some(report)) = (applied, finished) {
                prefs.update(|p| {
                    p.record(HistoryEntry::from_report(document.fingerprint(), &report));
                    persist(p);
                });
            }
        });
    };

    let on_new_analysis = move |_| session.update(|s| s.reset());

    view! {
        <div class="container">
            <Header
                dark_mode=dark_mode
                history_count=history_count
                on_toggle_history=on_toggle_history
                on_toggle_dark=on_toggle_dark
            />

            <Show when=move || show_history.get()>
                <HistoryPanel
                    history=history
                    on_open=on_open_history
                    on_clear=on_clear_history
                    on_close=move |_| show_history.set(false)
                />
            </Show>

            {move || match phase() {
                Phase::Reported => view! {
                    {move || report.get().map(|report| view! { <ReportView report=report /> })}
                    <ExportButtons report=report on_new_analysis=on_new_analysis />
                }.into_any(),
                Phase::Analyzing => view! {
                    <ProgressBar progress=progress />
                }.into_any(),
                Phase::Empty | Phase::FileSelected => view! {
                    <SettingsPanel
                        engine=engine
                        api_key=api_key
                        server_url=server_url.into()
                        on_save_api_key=on_save_api_key
                        on_clear_api_key=on_clear_api_key
                        on_server_url=on_server_url
                    />
                    <UploadArea session=session />
                    <div class="actions">
                        <button
                            class="btn btn-primary"
                            disabled=move || phase() != Phase::FileSelected
                            on:click=on_analyze
                        >
                            "분석 시작"
                        </button>
                    </div>
                }.into_any(),
            }}
        </div>
    }
}
