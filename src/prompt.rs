use crate::form::Submission;

/// Renders the company analysis instruction for one submission.
///
/// Every value is inserted verbatim; empty optional fields stay empty.
pub fn build_prompt(submission: &Submission, company_information: &str) -> String {
    format!(
        r#"
You are an advanced AI assistant with expertise in business strategy, market analysis, and competitive intelligence.
Using the information provided below, generate a comprehensive analysis focusing on the company's activities, leadership, competitors, and product strategy.

Details:
- **Product Name**: "{product_name}"
- **Company Website**: "{company_url}"
- **Product Category**: "{product_category}"
- **Competitors URLs**: {competitors_url}
- **Value Proposition**: "{value_proposition}"
- **Target Customer**: "{target_customer}"

Company Information (from web search):
{company_information}

Your task is to perform the following analysis:
1. **Company Strategy**:
    - Summarize the company's activities in the industry relevant to the product being sold.
    - Mention any recent public statements, press releases, or articles where key executives (e.g., Chief Data Officer, Chief Compliance Officer) have discussed relevant topics, such as product strategy, market positioning, or upcoming initiatives.
    - Look for any relevant mentions of technology stack, business focus, or new directions that are being pursued.
    - Optionally, refer to any job postings or skills required in recent job ads, as they may give insights into the company's strategy.

2. **Competitor Mentions**:
    - Highlight any relevant competitors mentioned in the input, providing context for their relationship with the target company (e.g., direct competitors, substitutes, market position).

3. **Leadership Information**:
    - Identify key leadership figures at the company (e.g., CEO, CTO, or other executives) and their relevance to the company's strategy.
    - If available, include insights from recent press releases, public statements, or articles where they discuss the company's direction, innovations, or challenges.

4. **Product/Strategy Summary**:
    - If the company is publicly traded, summarize insights from their 10-Ks, annual reports, investor presentations, or other public filings that provide information on their strategy, product roadmap, or market positioning.
    - Highlight any strategic initiatives or market trends the company is pursuing as indicated by public documents.

5. **Article Links**:
    - Include links to full articles, press releases, or other sources where key information was gathered from. Make sure to include specific URLs for any relevant external resources.

Ensure the analysis is well-structured, actionable, and formatted clearly for readability.
"#,
        product_name = submission.product_name,
        company_url = submission.company_url,
        product_category = submission.product_category,
        competitors_url = submission.competitors_url,
        value_proposition = submission.value_proposition,
        target_customer = submission.target_customer,
        company_information = company_information,
    )
}
