//! 내보내기 / 구글 시트 / 새 분석 버튼

use crate::export::{download_report, export_to_sheets};
use leptos::prelude::*;
use leptos::task::spawn_local;
use policy_review_common::{AnalysisReport, ExportFormat};

/// 버튼 아래 안내 문구
#[derive(Debug, Clone, PartialEq)]
enum Notice {
    Info(String),
    Error(String),
}

#[component]
pub fn ExportButtons<FN>(report: Signal<Option<AnalysisReport>>, on_new_analysis: FN) -> impl IntoView
where
    FN: Fn(()) + 'static + Clone,
{
    let (notice, set_notice) = signal(Option::<Notice>::None);

    let export = move |format: ExportFormat| {
        let result = report.with_untracked(|r| match r {
            Some(report) => download_report(report, format),
            None => Err("내보낼 결과가 없습니다".to_string()),
        });
        set_notice.set(result.err().map(Notice::Error));
    };

    let to_sheets = move |_| {
        let Some(report) = report.get_untracked() else {
            set_notice.set(Some(Notice::Error("내보낼 결과가 없습니다".to_string())));
            return;
        };
        spawn_local(async move {
            let notice = match export_to_sheets(&report).await {
                Ok(outcome) => Notice::Info(outcome.message().to_string()),
                Err(e) => Notice::Error(e),
            };
            set_notice.set(Some(notice));
        });
    };

    view! {
        <div class="export-buttons">
            {ExportFormat::ALL.into_iter().map(|format| view! {
                <button
                    class="btn btn-secondary"
                    disabled=move || report.with(|r| r.is_none())
                    on:click=move |_| export(format)
                >
                    {format!("{} 다운로드", format.label())}
                </button>
            }).collect_view()}

            <button
                class="btn btn-secondary"
                disabled=move || report.with(|r| r.is_none())
                on:click=to_sheets
            >
                "구글 시트로 보내기"
            </button>

            <button
                class="btn btn-primary"
                on:click={
                    let on_new_analysis = on_new_analysis.clone();
                    move |_| on_new_analysis(())
                }
            >
                "새 분석"
            </button>

            {move || notice.get().map(|notice| match notice {
                Notice::Info(text) => view! { <p class="info-message">{text}</p> }.into_any(),
                Notice::Error(text) => view! { <p class="error-message">{text}</p> }.into_any(),
            })}
        </div>
    }
}
