//! 헤더 (히스토리, 다크 모드 버튼)

use leptos::prelude::*;

#[component]
pub fn Header<FH, FD>(
    dark_mode: Signal<bool>,
    history_count: Signal<usize>,
    on_toggle_history: FH,
    on_toggle_dark: FD,
) -> impl IntoView
where
    FH: Fn(()) + 'static + Clone,
    FD: Fn(()) + 'static + Clone,
{
    view! {
        <header class="header">
            <div class="header-title">
                <h1>"🏢 취업규칙 검토 시스템"</h1>
                <p class="text-muted">"취업규칙을 검토하고 법적 준수 여부를 확인합니다"</p>
            </div>
            <div class="header-menu">
                <button
                    class="btn btn-icon"
                    title="분석 히스토리"
                    on:click={
                        let on_toggle_history = on_toggle_history.clone();
                        move |_| on_toggle_history(())
                    }
                >
                    "🕘 "
                    {move || history_count.get()}
                </button>
                <button
                    class="btn btn-icon"
                    title=move || if dark_mode.get() { "라이트 모드" } else { "다크 모드" }
                    on:click={
                        let on_toggle_dark = on_toggle_dark.clone();
                        move |_| on_toggle_dark(())
                    }
                >
                    {move || if dark_mode.get() { "☀️" } else { "🌙" }}
                </button>
            </div>
        </header>
    }
}
