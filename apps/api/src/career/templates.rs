// Text templates for generated career documents.
// Placeholders in `{braces}` are filled by `render`.

/// Replace `{skills}`, `{club}`, `{top_title}`.
pub const ADVICE_TEMPLATE: &str = "Based on your strengths in {skills}, consider bolstering \
hands-on SQL projects and joining {club} to prepare for roles like {top_title}.";

/// Replace `{skills}`, `{institution}`, `{title}`, `{company}`, `{signature}`.
pub const COVER_LETTER_TEMPLATE: &str = "Dear Hiring Manager,

My background in {skills} and recent projects at {institution} make me an \
excellent fit for the {title} role at {company}. \
I am excited about the opportunity to contribute and grow with your team.

Sincerely,
{signature}";

/// Replace `{title}`, `{name}`, `{institution}`, `{skills}`, `{hands_on}`,
/// `{company}`, `{signature}`.
pub const INTRO_EMAIL_TEMPLATE: &str = "Subject: Application for {title} – {name}

Hi there,

I’m a {institution} student with a strong foundation in {skills}{hands_on}. \
After reviewing the opening for a {title} at {company}, I believe my background \
aligns well with your needs. I’ve attached my résumé for your convenience and \
would welcome the chance to discuss how I can contribute to your team.

Thanks for your time and consideration!

Best regards,
{signature}";

/// Replace `{skill}`. Appended to the email's foundation sentence.
pub const HANDS_ON_FRAGMENT: &str = " and hands-on experience in {skill}";


/// Fills `{key}` slots in a single left-to-right pass. Substituted values are
/// never rescanned, so braces inside user data come through verbatim.
/// Unknown or unterminated slots are copied as-is.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let slot = after
            .find('}')
            .map(|close| &after[..close])
            .and_then(|key| values.iter().find(|(k, _)| *k == key).map(|(k, v)| (k.len(), *v)));
        match slot {
            Some((key_len, value)) => {
                out.push_str(value);
                rest = &after[key_len + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
