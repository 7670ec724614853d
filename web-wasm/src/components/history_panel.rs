//! 분석 히스토리 (최근 10건)

use leptos::prelude::*;
use policy_review_common::HistoryEntry;

#[component]
pub fn HistoryPanel<FO, FC, FX>(
    history: Signal<Vec<HistoryEntry>>,
    on_open: FO,
    on_clear: FC,
    on_close: FX,
) -> impl IntoView
where
    FO: Fn(HistoryEntry) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static + Clone + Send + Sync,
    FX: Fn(()) + 'static + Clone,
{
    view! {
        <aside class="history-panel">
            <div class="history-header">
                <h2>"분석 히스토리"</h2>
                <button
                    class="btn btn-icon"
                    on:click={
                        let on_close = on_close.clone();
                        move |_| on_close(())
                    }
                >
                    "✕"
                </button>
            </div>

            <Show
                when=move || history.with(|h| !h.is_empty())
                fallback=|| view! { <p class="text-muted">"아직 분석 히스토리가 없습니다"</p> }
            >
                <ul class="history-list">
                    <For
                        each=move || history.get()
                        key=|entry| entry.id.clone()
                        children={
                            let on_open = on_open.clone();
                            move |entry: HistoryEntry| {
                                let on_open = on_open.clone();
                                let can_open = entry.report.is_some();
                                let title = entry.file_name.clone();
                                let detail = format!(
                                    "{} · {}점 ({})",
                                    entry.analyzed_at, entry.compliance_score, entry.compliance_grade
                                );
                                let risk = entry.risk_level;
                                view! {
                                    <li
                                        class=if can_open { "history-item" } else { "history-item disabled" }
                                        on:click=move |_| {
                                            if can_open {
                                                on_open(entry.clone());
                                            }
                                        }
                                    >
                                        <div class="history-title">
                                            <h3>{title}</h3>
                                            <span class=format!("badge risk-{}", risk.css_suffix())>
                                                {risk.label()}
                                            </span>
                                        </div>
                                        <p class="text-muted">{detail}</p>
                                    </li>
                                }
                            }
                        }
                    />
                </ul>
                <button
                    class="btn btn-tertiary"
                    on:click={
                        let on_clear = on_clear.clone();
                        move |_| on_clear(())
                    }
                >
                    "히스토리 전체 삭제"
                </button>
            </Show>
        </aside>
    }
}
