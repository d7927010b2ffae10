use ammonia::clean_text;

use crate::{entities::contact::Contact, mail::mailer::OutgoingMail, utils::markdown::text_to_html};

const NONE_PROVIDED: &str = "None provided";

/// Notification sent to the site owner for each contact submission.
pub fn contact_notification(contact: &Contact) -> OutgoingMail {
    OutgoingMail {
        from_name: contact.name.clone(),
        reply_to: contact.email.clone(),
        subject: format!(
            "{} Project Inquiry: {} (Budget: {})",
            contact.needs, contact.project_type, contact.budget
        ),
        text_body: contact_text(contact),
        html_body: contact_html(contact),
    }
}

fn contact_text(contact: &Contact) -> String {
    let additional = if contact.additional.is_empty() {
        NONE_PROVIDED
    } else {
        contact.additional.as_str()
    };

    format!(
        "New contact form submission:\n\n\
         FROM: {name} <{email}>\n\
         PROJECT NEEDS: {needs}\n\
         PROJECT TYPE: {project_type}\n\
         BUDGET: {budget}\n\n\
         ADDITIONAL INFORMATION:\n\
         {additional}\n\n\
         This submission was saved in the database with ID: {id}\n",
        name = contact.name,
        email = contact.email,
        needs = contact.needs,
        project_type = contact.project_type,
        budget = contact.budget,
        additional = additional,
        id = contact.id,
    )
}

fn contact_html(contact: &Contact) -> String {
    let additional = if contact.additional.is_empty() {
        NONE_PROVIDED.to_string()
    } else {
        text_to_html(&contact.additional)
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <style>
    body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; }}
    .email-container {{ border: 1px solid #e0e0e0; border-radius: 8px; overflow: hidden; }}
    .email-header {{ background-color: #4a5568; color: white; padding: 20px; text-align: center; }}
    .email-body {{ padding: 20px; background-color: #fff; }}
    .email-footer {{ background-color: #f9f9f9; padding: 15px 20px; font-size: 0.85em; color: #666; border-top: 1px solid #e0e0e0; }}
    .contact-detail {{ margin-bottom: 15px; padding-bottom: 15px; border-bottom: 1px solid #eee; }}
    .label {{ font-weight: bold; display: inline-block; width: 120px; color: #4a5568; }}
    .highlight {{ font-weight: 600; color: #2d3748; }}
    .additional-info {{ background-color: #f7fafc; padding: 15px; border-radius: 6px; margin-top: 15px; }}
    .sender-info {{ margin-bottom: 20px; padding: 15px; background-color: #ebf8ff; border-radius: 6px; border-left: 4px solid #4299e1; }}
    .sender-name {{ font-weight: bold; font-size: 1.1em; color: #2b6cb0; }}
  </style>
</head>
<body>
  <div class="email-container">
    <div class="email-header"><h2>New Contact Form Submission</h2></div>
    <div class="email-body">
      <div class="sender-info">
        <div class="sender-name">{name}</div>
        <div class="sender-email">{email}</div>
      </div>
      <div class="contact-detail"><span class="label">Project Needs:</span> <span class="highlight">{needs}</span></div>
      <div class="contact-detail"><span class="label">Project Type:</span> <span class="highlight">{project_type}</span></div>
      <div class="contact-detail"><span class="label">Budget:</span> <span class="highlight">{budget}</span></div>
      <div class="contact-detail">
        <span class="label">Additional Info:</span>
        <div class="additional-info">{additional}</div>
      </div>
    </div>
    <div class="email-footer">
      <p>Submission ID: {id}</p>
      <p>This message was sent from your portfolio website contact form.</p>
    </div>
  </div>
</body>
</html>
"#,
        name = clean_text(&contact.name),
        email = clean_text(&contact.email),
        needs = clean_text(&contact.needs),
        project_type = clean_text(&contact.project_type),
        budget = clean_text(&contact.budget),
        additional = additional,
        id = contact.id,
    )
}
