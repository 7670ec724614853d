//! 업로드 영역 (드래그 앤 드롭, 클릭 선택)

use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use policy_review_common::intake::ACCEPT_ATTRIBUTE;
use policy_review_common::{Phase, Session};
use wasm_bindgen_futures::JsFuture;
use web_sys::{DragEvent, File, HtmlInputElement};

#[component]
pub fn UploadArea(session: RwSignal<Session>) -> impl IntoView {
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<Input>::new();

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);

        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            read_file(file, session);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    // 숨긴 <input type=file>로 파일 선택 창을 연다
    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            read_file(file, session);
        }
        // 같은 파일을 다시 고를 수 있게
        input.set_value("");
    };

    let selected = move || session.with(|s| s.document().map(|d| (d.file_name.clone(), d.display_size())));
    let error = move || session.with(|s| s.error().map(str::to_string));

    view! {
        <div class="upload-section">
            <input
                type="file"
                accept=ACCEPT_ATTRIBUTE
                node_ref=input_ref
                style="display: none"
                on:change=on_change
            />

            {move || match selected() {
                Some((name, size)) => view! {
                    <div class="selected-file">
                        <div class="file-icon">"📄"</div>
                        <div class="file-info">
                            <p class="file-name">{name}</p>
                            <p class="text-muted">{size}</p>
                        </div>
                        <button
                            class="btn btn-tertiary btn-small"
                            on:click=move |_| session.update(|s| s.remove_file())
                        >
                            "제거"
                        </button>
                    </div>
                }.into_any(),
                None => view! {
                    <div
                        class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
                        on:drop=on_drop
                        on:dragover=on_dragover
                        on:dragleave=on_dragleave
                        on:click=on_click
                    >
                        <div class="upload-icon">"📁"</div>
                        <p>"취업규칙 파일을 드래그 앤 드롭 또는 클릭하여 선택"</p>
                        <p class="text-muted">"지원 형식: TXT, PDF, DOC, DOCX (최대 10MB)"</p>
                    </div>
                }.into_any(),
            }}

            <Show when=move || error().is_some()>
                <p class="error-message">{move || error().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}

/// 파일을 읽어 세션에 넣는다. 형식/크기는 읽기 전에 먼저 확인한다.
fn read_file(file: File, session: RwSignal<Session>) {
    if session.with_untracked(|s| !matches!(s.phase(), Phase::Empty | Phase::FileSelected)) {
        return;
    }

    let name = file.name();
    let media_type = file.type_();
    let size = file.size() as u64;

    let checked = session
        .try_update(|s| s.precheck(&name, &media_type, size))
        .map(|r| r.is_ok())
        .unwrap_or(false);
    if !checked {
        return;
    }

    spawn_local(async move {
        match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => {
                let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                session.update(|s| {
                    // 검증 실패 메시지는 세션에 남는다
                    let _ = s.select_file(&name, &media_type, &bytes);
                });
            }
            Err(e) => {
                web_sys::console::error_2(&"파일 읽기 실패".into(), &e);
            }
        }
    });
}
