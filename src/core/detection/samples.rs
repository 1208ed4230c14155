// Built-in sample emails for trying the detector without any input file.

/// Prize-scam spam, a normal work email, and an urgent phishing notice.
pub const SAMPLE_EMAILS: [&str; 3] = [
    "Congratulations! You've won $1,000,000! Click here NOW to claim your prize! Limited time offer - ACT FAST!",
    "Hi John, just wanted to follow up on our meeting yesterday. Looking forward to hearing your thoughts on the proposal.",
    "URGENT!!! Your account will be suspended unless you verify your information immediately! Click this link: http://suspicious-site.com",
];

/// Look up a sample by its 1-based number.
pub fn sample(number: usize) -> Option<&'static str> {
    number
        .checked_sub(1)
        .and_then(|index| SAMPLE_EMAILS.get(index))
        .copied()
}
