//! 분석 결과 화면

use leptos::prelude::*;
use policy_review_common::AnalysisReport;

#[component]
pub fn ReportView(report: AnalysisReport) -> impl IntoView {
    let meta = &report.meta;
    let source_info = format!(
        "{} ({}) · {} {} · {}",
        meta.file_name, meta.file_size, meta.analysis_date, meta.analysis_time, meta.ai_mode
    );
    let note = (!meta.note.is_empty()).then(|| meta.note.clone());
    let compliant = report.compliant_count();
    let needs_improvement = report.needs_improvement_count();
    let risk_class = format!("badge risk-{}", report.risk_level.css_suffix());

    view! {
        <div class="report">
            <section class="card summary-card">
                <div class="score">
                    <span class="score-value">{report.compliance_score}</span>
                    <span class="score-unit">"점"</span>
                    <span class="grade">{report.compliance_grade.label()}</span>
                </div>
                <div class="summary-body">
                    <p>
                        "위험도 "
                        <span class=risk_class>{report.risk_level.label()}</span>
                        {format!(" · 준수 {}건 · 개선필요 {}건", compliant, needs_improvement)}
                    </p>
                    <p class="summary">{report.summary.clone()}</p>
                    <p class="text-muted">{source_info}</p>
                </div>
            </section>

            <section class="card">
                <h2>"필수 기재사항"</h2>
                <table>
                    <thead>
                        <tr><th>"항목"</th><th>"상태"</th><th>"설명"</th><th>"준수율"</th></tr>
                    </thead>
                    <tbody>
                        {report.required_items.iter().map(|item| view! {
                            <tr>
                                <td>{item.item.clone()}</td>
                                <td class=item.status.css_class()>{item.status.label()}</td>
                                <td>{item.description.clone()}</td>
                                <td>
                                    <div class="meter">
                                        <div class="meter-fill" style=format!("width: {}%", item.compliance)/>
                                    </div>
                                    {format!("{}%", item.compliance)}
                                </td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            </section>

            <section class="card">
                <h2>"위험 요소"</h2>
                {if report.risk_factors.is_empty() {
                    view! { <p class="text-muted">"발견된 위험 요소가 없습니다"</p> }.into_any()
                } else {
                    view! {
                        <ul class="risk-list">
                            {report.risk_factors.iter().map(|risk| view! {
                                <li class=format!("risk-item risk-{}", risk.level.css_suffix())>
                                    <strong>{risk.factor.clone()}</strong>
                                    <span class="badge">{risk.level.label()}</span>
                                    <p>{risk.description.clone()}</p>
                                    <p class="text-muted">{format!("권고: {}", risk.recommendation)}</p>
                                </li>
                            }).collect_view()}
                        </ul>
                    }.into_any()
                }}
            </section>

            <section class="card">
                <h2>"개선 권고사항"</h2>
                <ol class="recommendations">
                    {report.recommendations.iter().map(|rec| view! {
                        <li>
                            <span class=format!("badge risk-{}", rec.priority.css_suffix())>
                                {rec.priority.label()}
                            </span>
                            <strong>{rec.item.clone()}</strong>
                            <p>{rec.action.clone()}</p>
                            <p class="text-muted">{format!("기한: {}", rec.deadline)}</p>
                        </li>
                    }).collect_view()}
                </ol>
            </section>

            {note.map(|note| view! { <p class="note">{note}</p> })}
        </div>
    }
}
