//! FMF metadata scheme understood by the exporter

/// Every recognized test case key, with its type and default
pub const METADATA_SCHEME: &str = r#"# FMF test case metadata scheme
#
# Keys are inherited from parent nodes. A key ending in '+' extends the
# inherited value instead of replacing it (lists and strings are appended,
# mappings are merged). Only leaf nodes are test cases.

summary: string                      # default: ""
description: string                  # default: ""
tags: [string]                       # alias: tag, default: []
authors: [string]                    # alias: author, "Name <user@domain>", default: []
approvals: [string]                  # "Name <user@domain>", default: []
type: string                         # Polarion testtype, default: ""
level: string                        # Polarion caselevel, default: ""
subtypes: [string]                   # alias: subtype, first two are used, default: []
importance: string                   # Polarion caseimportance, default: ""
estimate: string                     # default: ""
components: string | [string]        # alias: component, first one is used, default: []
sub-components: string | [string]    # alias: subcomponents, first one is used, default: []
defects:                             # default: []
  - jira: string                     # issue key or browse URL
    polarion: string                 # work item id
    bugzilla: string                 # bug id or URL
    customer-case: bool              # default: false
requirements:                        # same shape as defects, default: []
  - polarion: string
test-setup:                          # default: []
  - step: string
    expected: string
test-teardown:                       # same shape as test-setup, default: []
test-steps:                          # same shape as test-setup, default: []
parameters: [string]                 # default: []
testsuite:
  parameters: [string]               # default: []
  properties: {string: string}       # polarion-project-id sets the project
  compatible_topologies: [string]    # default: []
adapter:
  polarion:
    project: string                  # default: testsuite polarion-project-id
    lookup-method: string            # default: name
    positive: string                 # positive | negative, default: positive
    automated: string                # automated | notautomated, default: automated
    automation-script: string        # default: ""
"#;
