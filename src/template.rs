//! Handlebars templates for the two output dialects. Both render the same
//! grouped context; only the line and header formats differ. Newlines are
//! explicit so the emitted text is stable byte-for-byte.

pub const DOCUMENT_TEMPLATE: &str = "{{#each sections}}## {{{name}}}: {{{description}}}\n{{#each issues}}- [{{{title}}}]({{{url}}}) {{{author}}}\n{{/each}}{{/each}}## Label is empty\n{{#each unlabeled}}- [{{{title}}}]({{{url}}}) {{{author}}}\n{{/each}}";

pub const CHAT_TEMPLATE: &str = "{{#each sections}}*{{{name}}}*: {{{description}}}\n{{#each issues}}- <{{{url}}}| {{{title}}}> by {{{author}}}\n{{/each}}{{/each}}*Label is empty*\n{{#each unlabeled}}- <{{{url}}}| {{{title}}}> by {{{author}}}\n{{/each}}";
